use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/add-participant", post(handlers::participant::add_participant))
        .route("/participants", get(handlers::participant::list_participants))
}
