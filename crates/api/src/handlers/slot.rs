//! # Slot Handlers
//!
//! Form-driven routes (`create-list`, `edit-list`, `delete`) answer with a
//! `303 See Other` carrying a flash message. Request-level failures
//! (unreadable bodies, validation, clashes, unknown ids) become error
//! flashes; storage failures become a 500.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use slotbook_core::{
    errors::SchedulingError,
    models::slot::{SlotDisplay, SlotInfoResponse, SlotRequest},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    middleware::{
        error_handling::AppError,
        extract::JsonOrForm,
        flash::{back, recover, Flash, FlashQuery},
    },
    ApiState,
};

pub const SLOT_SCHEDULED: &str = "Interview Scheduled Successfully";
pub const SLOT_UPDATED: &str = "Record Updated";
pub const SLOT_DELETED: &str = "Interview Deleted Successfully";

/// `GET /`: every slot with its participants, times shown in UTC.
#[axum::debug_handler]
pub async fn home(
    State(state): State<Arc<ApiState>>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, AppError> {
    let slots = state.service.list_slots().await?;
    let participants = state.service.list_participants().await?;

    let display: Vec<SlotDisplay> = slots.iter().map(SlotDisplay::from).collect();
    let page = state
        .views
        .home(&display, &participants, flash.into_flash().as_ref())?;

    Ok(page)
}

/// `GET /info/:id`: `{ "data": slot }`, or `{ "data": null }` with 404.
#[axum::debug_handler]
pub async fn get_info(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    match state.service.get_slot(id).await {
        Ok(slot) => Ok(Json(SlotInfoResponse { data: Some(slot) }).into_response()),
        Err(SchedulingError::NotFound(_)) => {
            Ok((StatusCode::NOT_FOUND, Json(SlotInfoResponse { data: None })).into_response())
        }
        Err(err) => Err(AppError(err)),
    }
}

/// `GET /create-list`: the scheduling form.
#[axum::debug_handler]
pub async fn render_create_list(
    State(state): State<Arc<ApiState>>,
    Query(flash): Query<FlashQuery>,
) -> Result<Html<String>, AppError> {
    let participants = state.service.list_participants().await?;
    let offset = state.service.input_offset().to_string();

    let page = state
        .views
        .create_list(&participants, &offset, flash.into_flash().as_ref())?;

    Ok(page)
}

/// `POST /create-list`
#[axum::debug_handler]
pub async fn create_list(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    body: Result<JsonOrForm<SlotRequest>, AppError>,
) -> Result<Redirect, AppError> {
    let target = back(&headers);
    let JsonOrForm(payload) = match body {
        Ok(body) => body,
        Err(AppError(err)) => return recover(err, &target),
    };

    match state.service.create_slot(&payload).await {
        Ok(_) => Ok(Flash::success(SLOT_SCHEDULED).redirect_to("/")),
        Err(err) => recover(err, &target),
    }
}

/// `PUT /edit-list/:id`
#[axum::debug_handler]
pub async fn edit_list(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Result<JsonOrForm<SlotRequest>, AppError>,
) -> Result<Redirect, AppError> {
    let target = back(&headers);
    let JsonOrForm(payload) = match body {
        Ok(body) => body,
        Err(AppError(err)) => return recover(err, &target),
    };

    match state.service.edit_slot(id, &payload).await {
        Ok(_) => Ok(Flash::success(SLOT_UPDATED).redirect_to(&target)),
        Err(err) => recover(err, &target),
    }
}

/// `DELETE /delete/:id`
#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, AppError> {
    match state.service.delete_slot(id).await {
        Ok(()) => Ok(Flash::success(SLOT_DELETED).redirect_to("/")),
        Err(err) => recover(err, "/"),
    }
}
