use axum::{
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(handlers::slot::home))
        .route("/info/:id", get(handlers::slot::get_info))
        .route(
            "/create-list",
            get(handlers::slot::render_create_list).post(handlers::slot::create_list),
        )
        .route("/edit-list/:id", put(handlers::slot::edit_list))
        .route("/delete/:id", delete(handlers::slot::delete_slot))
}
