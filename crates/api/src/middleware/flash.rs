//! One-shot status messages.
//!
//! A flash travels in the query string of the redirect that follows a form
//! submission (`/?success=...` or `/create-list?error=...`) and is shown by
//! whichever view handles that request. Nothing is stored server-side.

use axum::{
    http::{HeaderMap, header::REFERER},
    response::Redirect,
};
use serde::{Deserialize, Serialize};
use slotbook_core::errors::SchedulingError;
use tracing::warn;
use url::Url;

use crate::middleware::error_handling::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn as_param(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    /// `target` with this flash appended as a query parameter.
    pub fn location(&self, target: &str) -> String {
        let separator = if target.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            target,
            separator,
            self.kind.as_param(),
            urlencoding::encode(&self.message)
        )
    }

    pub fn redirect_to(&self, target: &str) -> Redirect {
        Redirect::to(&self.location(target))
    }
}

/// Query parameters a view reads its flash from.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl FlashQuery {
    /// An error wins if both are present.
    pub fn into_flash(self) -> Option<Flash> {
        match (self.success, self.error) {
            (_, Some(message)) => Some(Flash::error(message)),
            (Some(message), None) => Some(Flash::success(message)),
            (None, None) => None,
        }
    }
}

/// Path of the page that submitted the request, from `Referer`, with any
/// previous flash removed. Only the path is kept so a redirect never leaves
/// this site. Falls back to `/`.
pub fn back(headers: &HeaderMap) -> String {
    let Some(referer) = headers.get(REFERER).and_then(|value| value.to_str().ok()) else {
        return "/".to_string();
    };

    let parsed = Url::parse(referer).or_else(|_| Url::parse("http://localhost").and_then(|base| base.join(referer)));
    let Ok(url) = parsed else {
        return "/".to_string();
    };

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "success" && key != "error")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        return url.path().to_string();
    }

    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(kept)
        .finish();
    format!("{}?{}", url.path(), query)
}

/// Turns a request-level failure into a redirect carrying an error flash.
/// Storage and internal failures are not recoverable this way and are
/// returned as errors.
pub fn recover(err: SchedulingError, target: &str) -> Result<Redirect, AppError> {
    if err.is_server_error() {
        return Err(AppError(err));
    }

    warn!("Request rejected: {}", err);
    Ok(Flash::error(err.user_message()).redirect_to(target))
}
