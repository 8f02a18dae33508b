use axum::{extract::State, http::StatusCode, Json};
use slotbook_core::models::participant::{
    AddParticipantResponse, ListParticipantsResponse, NewParticipant,
};
use std::sync::Arc;
use tracing::{error, warn};

use crate::{
    middleware::{error_handling::AppError, extract::JsonOrForm},
    ApiState,
};

pub const PARTICIPANT_CREATED: &str = "Participant Created";

/// `POST /add-participant`. Always answers with `{ "message": ... }`.
#[axum::debug_handler]
pub async fn add_participant(
    State(state): State<Arc<ApiState>>,
    body: Result<JsonOrForm<NewParticipant>, AppError>,
) -> (StatusCode, Json<AddParticipantResponse>) {
    let created = match body {
        Ok(JsonOrForm(payload)) => state.service.add_participant(payload).await,
        Err(AppError(err)) => Err(err),
    };

    let (status, message) = match created {
        Ok(_) => (StatusCode::OK, PARTICIPANT_CREATED.to_string()),
        Err(err) if err.is_server_error() => {
            error!("Error creating participant: {:?}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.user_message())
        }
        Err(err) => {
            warn!("Participant rejected: {}", err);
            (StatusCode::BAD_REQUEST, err.user_message())
        }
    };

    (status, Json(AddParticipantResponse { message }))
}

#[axum::debug_handler]
pub async fn list_participants(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ListParticipantsResponse>, AppError> {
    let data = state.service.list_participants().await?;
    Ok(Json(ListParticipantsResponse { data }))
}
