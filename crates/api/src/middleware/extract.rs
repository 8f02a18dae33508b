//! Body extraction for routes that serve both HTML forms and `fetch`
//! callers.
//!
//! JSON bodies are decoded directly. Anything else is read as
//! `application/x-www-form-urlencoded`, where a key that repeats (or ends
//! in `[]`) becomes a list, so checkbox groups like `pid=a&pid=b` decode
//! into a `Vec`.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use slotbook_core::errors::SchedulingError;

use crate::middleware::error_handling::AppError;

pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| invalid_body(rejection.body_text()))?;

        let value = if is_json {
            serde_json::from_slice(&body).map_err(|e| invalid_body(e.to_string()))?
        } else {
            form_to_json(&body)
        };

        serde_json::from_value(value)
            .map(JsonOrForm)
            .map_err(|e| invalid_body(e.to_string()))
    }
}

fn invalid_body(detail: String) -> AppError {
    AppError(SchedulingError::Validation(format!("Invalid request body: {}", detail)))
}

/// Decodes a urlencoded body into a JSON object of strings and string lists.
pub fn form_to_json(body: &[u8]) -> Value {
    let mut fields = Map::new();

    for (key, value) in url::form_urlencoded::parse(body) {
        let is_list = key.ends_with("[]");
        let key = if is_list {
            key[..key.len() - 2].to_string()
        } else {
            key.into_owned()
        };
        let value = Value::String(value.into_owned());

        match fields.get_mut(&key) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None if is_list => {
                fields.insert(key, Value::Array(vec![value]));
            }
            None => {
                fields.insert(key, value);
            }
        }
    }

    Value::Object(fields)
}
