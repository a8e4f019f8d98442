use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::services::SendService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Empty when authentication is disabled.
    pub api_key: String,
    /// None when no sender is configured; /v1/send answers 503.
    pub send_service: Option<Arc<SendService>>,
}

impl AppState {
    pub fn new(api_key: String, send_service: Option<Arc<SendService>>) -> Self {
        Self {
            api_key,
            send_service,
        }
    }
}

/// Creates the main API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health_check))
        .route("/v1/send", post(handlers::send_email))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
