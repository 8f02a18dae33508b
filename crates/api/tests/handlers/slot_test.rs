use axum::{
    body::Bytes,
    http::{HeaderName, HeaderValue, StatusCode, header},
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use slotbook_core::store::{ParticipantStore, SlotStore};
use uuid::Uuid;

use crate::test_utils::{DAY, TestContext, slot_body, slot_request};

const FORM: &str = "application/x-www-form-urlencoded";

fn location(response: &axum_test::TestResponse) -> String {
    response.header(header::LOCATION).to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_list_redirects_home_with_success() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;
    let server = ctx.server();

    let response = server
        .post("/create-list")
        .json(&slot_body("10:00", "11:00", &p))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?success=Interview%20Scheduled%20Successfully");
    assert_eq!(SlotStore::list_all(ctx.store.as_ref()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_list_clash_redirects_back_with_error() {
    let ctx = TestContext::new();
    let p = ctx.participants(3).await;
    ctx.service
        .create_slot(&slot_request("10:00", "11:00", &[p[0], p[1]]))
        .await
        .unwrap();
    let server = ctx.server();

    let response = server
        .post("/create-list")
        .add_header(
            HeaderName::from_static("referer"),
            HeaderValue::from_static("http://localhost:3000/create-list"),
        )
        .json(&slot_body("10:30", "11:30", &[p[1], p[2]]))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/create-list?error=Time%20clash%20with%20one%20of%20the%20participants"
    );
    assert_eq!(SlotStore::list_all(ctx.store.as_ref()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_list_without_referer_falls_back_home() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;
    let server = ctx.server();

    let response = server
        .post("/create-list")
        .json(&slot_body("11:00", "10:00", &p))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/?error=End%20time%20cannot%20be%20before%20start%20time"
    );
}

#[tokio::test]
async fn test_create_list_accepts_form_with_repeated_pid() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;
    let server = ctx.server();

    let form = format!(
        "description=Screening&category=hr&date={}&start_time=09%3A00&end_time=09%3A30&pid={}&pid={}",
        DAY, p[0], p[1]
    );
    let response = server
        .post("/create-list")
        .bytes(Bytes::from(form))
        .content_type(FORM)
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?success=Interview%20Scheduled%20Successfully");

    let slots = SlotStore::list_all(ctx.store.as_ref()).await.unwrap();
    assert_eq!(slots[0].participants, p);
    assert_eq!(slots[0].description, "Screening");
}

#[tokio::test]
async fn test_info_returns_slot_with_participants() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;
    let slot = ctx
        .service
        .create_slot(&slot_request("10:00", "11:00", &p))
        .await
        .unwrap();
    let server = ctx.server();

    let response = server.get(&format!("/info/{}", slot.id)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["id"], slot.id.to_string());
    assert_eq!(body["data"]["start_time"], "2024-05-01T04:30:00Z");
    assert_eq!(body["data"]["participants"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_info_for_unknown_id_is_null() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get(&format!("/info/{}", Uuid::new_v4())).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_edit_list_updates_and_redirects_back() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;
    let slot = ctx
        .service
        .create_slot(&slot_request("10:00", "11:00", &p))
        .await
        .unwrap();
    let server = ctx.server();

    let response = server
        .put(&format!("/edit-list/{}", slot.id))
        .add_header(
            HeaderName::from_static("referer"),
            HeaderValue::from_static("http://localhost:3000/?success=Interview%20Scheduled%20Successfully"),
        )
        .json(&slot_body("10:30", "11:30", &p))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?success=Record%20Updated");

    let stored = ctx.store.get_by_id(slot.id).await.unwrap().unwrap();
    assert_ne!(stored.start_time, slot.start_time);
}

#[tokio::test]
async fn test_edit_list_unknown_id_flashes_error() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;
    let server = ctx.server();

    let response = server
        .put(&format!("/edit-list/{}", Uuid::new_v4()))
        .json(&slot_body("10:00", "11:00", &p))
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/?error=Slot%20with%20ID%20"));
}

#[tokio::test]
async fn test_delete_removes_slot_and_redirects_home() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;
    let slot = ctx
        .service
        .create_slot(&slot_request("10:00", "11:00", &p))
        .await
        .unwrap();
    let server = ctx.server();

    let response = server.delete(&format!("/delete/{}", slot.id)).await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?success=Interview%20Deleted%20Successfully");
    assert!(ctx.store.get_by_id(slot.id).await.unwrap().is_none());
    assert_eq!(ParticipantStore::list_all(ctx.store.as_ref()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_unknown_id_flashes_error() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.delete(&format!("/delete/{}", Uuid::new_v4())).await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/?error="));
}

#[tokio::test]
async fn test_home_lists_slots_in_utc() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;
    ctx.service
        .create_slot(&slot_request("10:00", "11:00", &p))
        .await
        .unwrap();
    let server = ctx.server();

    let response = server
        .get("/")
        .add_query_param("success", "Record Updated")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("2024-05-01T04:30:00Z"));
    assert!(html.contains("Technical interview"));
    assert!(html.contains("Record Updated"));
}

#[tokio::test]
async fn test_create_form_lists_participants() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;
    let server = ctx.server();

    let response = server.get("/create-list").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    for id in &p {
        assert!(html.contains(&id.to_string()));
    }
    assert!(html.contains("+05:30"));
}

#[tokio::test]
async fn test_health_reports_input_offset() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["input_offset"], "+05:30");
}

#[tokio::test]
async fn test_create_list_missing_fields_redirects_with_error() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;
    let server = ctx.server();

    let mut body = slot_body("10:00", "11:00", &p);
    body.as_object_mut().unwrap().remove("date");

    let response = server
        .post("/create-list")
        .add_header(
            HeaderName::from_static("referer"),
            HeaderValue::from_static("http://localhost:3000/create-list"),
        )
        .json(&body)
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/create-list?error=Invalid%20request%20body"));
    assert!(SlotStore::list_all(ctx.store.as_ref()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_list_unreadable_body_redirects_with_error() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;
    let slot = ctx
        .service
        .create_slot(&slot_request("10:00", "11:00", &p))
        .await
        .unwrap();
    let server = ctx.server();

    let response = server
        .put(&format!("/edit-list/{}", slot.id))
        .bytes(Bytes::from_static(b"{not json"))
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/?error=Invalid%20request%20body"));

    let stored = ctx.store.get_by_id(slot.id).await.unwrap().unwrap();
    assert_eq!(stored.start_time, slot.start_time);
}
