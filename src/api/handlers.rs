//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, ClockIntent};
use super::responses::{ClockResponse, HealthResponse, IntentResponse, StatusResponse};

/// Apply `intent` and answer with the updated clock view
fn handle_intent(state: &AppState, intent: ClockIntent) -> Result<Json<IntentResponse>, StatusCode> {
    let clock = state.apply_intent(intent).map_err(|e| {
        error!("Failed to apply {}: {}", intent, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let fullscreen = state.is_fullscreen().map_err(|e| {
        error!("Failed to read display state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!("{} -> {} {} ({})", intent, clock.level, clock.remaining,
          if clock.running { "running" } else { "paused" });
    Ok(Json(IntentResponse::new(intent.as_str(), ClockResponse { clock, fullscreen })))
}

/// Handle POST /clock/toggle - Start or pause the clock
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<IntentResponse>, StatusCode> {
    handle_intent(&state, ClockIntent::ToggleStartPause)
}

/// Handle POST /clock/previous - Step back one level
pub async fn previous_handler(State(state): State<Arc<AppState>>) -> Result<Json<IntentResponse>, StatusCode> {
    handle_intent(&state, ClockIntent::StepPrevious)
}

/// Handle POST /clock/next - Step forward one level
pub async fn next_handler(State(state): State<Arc<AppState>>) -> Result<Json<IntentResponse>, StatusCode> {
    handle_intent(&state, ClockIntent::StepNext)
}

/// Handle POST /clock/add-minute
pub async fn add_minute_handler(State(state): State<Arc<AppState>>) -> Result<Json<IntentResponse>, StatusCode> {
    handle_intent(&state, ClockIntent::AddMinute)
}

/// Handle POST /clock/subtract-minute
pub async fn subtract_minute_handler(State(state): State<Arc<AppState>>) -> Result<Json<IntentResponse>, StatusCode> {
    handle_intent(&state, ClockIntent::SubtractMinute)
}

/// Handle POST /display/fullscreen - Ask the display client to toggle fullscreen
pub async fn fullscreen_handler(State(state): State<Arc<AppState>>) -> Result<Json<IntentResponse>, StatusCode> {
    handle_intent(&state, ClockIntent::ToggleFullscreen)
}

fn clock_view(state: &AppState) -> Result<ClockResponse, StatusCode> {
    let clock = state.latest_snapshot().map_err(|e| {
        error!("Failed to read clock snapshot: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let fullscreen = state.is_fullscreen().map_err(|e| {
        error!("Failed to read display state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(ClockResponse { clock, fullscreen })
}

/// Handle GET /clock - Latest clock face
pub async fn clock_handler(State(state): State<Arc<AppState>>) -> Result<Json<ClockResponse>, StatusCode> {
    clock_view(&state).map(Json)
}

/// Handle GET /status - Clock face plus server information
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let view = clock_view(&state)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        view,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
