use axum::{body::Bytes, http::StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_add_participant_from_json() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/add-participant")
        .json(&json!({ "name": "Asha Rao", "phone": "98450 12345", "email": "asha@example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "message": "Participant Created" }));
}

#[tokio::test]
async fn test_add_participant_from_form() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/add-participant")
        .bytes(Bytes::from_static(b"name=Lin+Wei&email=lin%40example.com"))
        .content_type("application/x-www-form-urlencoded")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let listed: Value = server.get("/participants").await.json();
    let data = listed["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Lin Wei");
    assert_eq!(data[0]["email"], "lin@example.com");
    assert_eq!(data[0]["phone"], "");
}

#[tokio::test]
async fn test_add_participant_without_name_is_rejected() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/add-participant")
        .json(&json!({ "name": "  ", "email": "nobody@example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Participant name is required" })
    );
}

#[tokio::test]
async fn test_participants_listed_in_creation_order() {
    let ctx = TestContext::new();
    let ids = ctx.participants(3).await;
    let server = ctx.server();

    let listed: Value = server.get("/participants").await.json();
    let returned: Vec<String> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(returned, ids.iter().map(|id| id.to_string()).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_add_participant_missing_name_answers_with_message() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/add-participant")
        .json(&json!({ "email": "nobody@example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
    assert!(body.get("error").is_none());

    let listed: Value = server.get("/participants").await.json();
    assert!(listed["data"].as_array().unwrap().is_empty());
}
