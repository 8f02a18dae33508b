//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Slotbook API.
//! It maps domain-specific errors to appropriate HTTP status codes and JSON
//! error responses.
//!
//! Storage failures are logged here, once, at the request boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotbook_core::errors::SchedulingError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotbook_api::middleware::error_handling::AppError;
/// use slotbook_core::errors::SchedulingError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(SchedulingError::NotFound("Slot not found".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SchedulingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SchedulingError::NotFound(_) => StatusCode::NOT_FOUND,
            SchedulingError::Validation(_) => StatusCode::BAD_REQUEST,
            SchedulingError::Conflict(_) => StatusCode::CONFLICT,
            SchedulingError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SchedulingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.0.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));

        (status, body).into_response()
    }
}

/// Allows using `?` on `SchedulingResult` inside handlers.
impl From<SchedulingError> for AppError {
    fn from(err: SchedulingError) -> Self {
        AppError(err)
    }
}

/// Wraps bare `eyre` failures as persistence errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SchedulingError::Persistence(err))
    }
}

/// Maps a SchedulingError to an HTTP response
pub fn map_error(err: SchedulingError) -> Response {
    AppError(err).into_response()
}
