//! HTTP API module
//! 
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/clock", get(clock_handler))
        .route("/clock/toggle", post(toggle_handler))
        .route("/clock/previous", post(previous_handler))
        .route("/clock/next", post(next_handler))
        .route("/clock/add-minute", post(add_minute_handler))
        .route("/clock/subtract-minute", post(subtract_minute_handler))
        .route("/display/fullscreen", post(fullscreen_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
