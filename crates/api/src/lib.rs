//! # Slotbook API
//!
//! The API crate provides the web server for the Slotbook interview
//! scheduler: HTML views, form endpoints and a small JSON surface.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into service calls and responses
//! - **Service**: Validation, clash detection and persistence orchestration
//! - **Middleware**: Body extraction, flash messages and error mapping
//! - **Views**: Handlebars templates for the HTML pages
//! - **Config**: Environment configuration
//!
//! The API uses Axum as the web framework. Storage is reached only through
//! the `slotbook-core` store traits.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Body extraction, flash messages and error handling
pub mod middleware;
/// Route definitions
pub mod routes;
/// Scheduling orchestration over the store traits
pub mod service;
/// HTML templates
pub mod views;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::{service::SchedulingService, views::Views};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Scheduling operations over the configured store
    pub service: SchedulingService,
    /// Compiled HTML templates
    pub views: Views,
}

impl ApiState {
    pub fn new(service: SchedulingService) -> Result<Self> {
        Ok(Self {
            service,
            views: Views::new()?,
        })
    }
}

/// Installs the global `tracing` subscriber.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with all routes and the given state.
///
/// Transport layers (tracing, CORS, timeouts) are added by
/// [`start_server`], so tests can drive this router directly.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot pages and form endpoints
        .merge(routes::slot::routes())
        // Participant endpoints
        .merge(routes::participant::routes())
        // Attach shared state to all routes
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(allowed)
}

/// Starts the HTTP server with the provided configuration and service.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// use std::sync::Arc;
/// use slotbook_api::{config::ApiConfig, service::SchedulingService, start_server};
/// use slotbook_db::MemoryStore;
///
/// let config = ApiConfig::from_env()?;
/// let service = SchedulingService::with_store(Arc::new(MemoryStore::new()), config.input_offset);
/// start_server(config, service).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, service: SchedulingService) -> Result<()> {
    // Create shared state with dependencies
    let state = Arc::new(ApiState::new(service)?);

    let app = router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
