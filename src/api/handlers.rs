//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    countdown::CountdownState,
    display::picker_columns,
    state::{AppState, TimerState},
};
use super::responses::{
    AlertResponse, ApiResponse, DurationRequest, HealthResponse, PickerResponse, StatusResponse,
};

/// Handle POST /duration - Apply a picker selection
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    match state.select(request.minutes, request.seconds) {
        Ok(timer) => {
            info!("Duration endpoint called - {}min {}sec", request.minutes, request.seconds);
            let message = if timer.is_active() {
                "Duration saved for the next run".to_string()
            } else {
                format!("Duration set to {}min {}sec", request.minutes, request.seconds)
            };
            Ok(Json(ApiResponse::ok(message, timer)))
        }
        Err(e) => {
            warn!("Rejected duration selection: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(e.to_string(), TimerState::capture(&state.countdown))),
            ))
        }
    }
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let before = state.countdown.state();
    let timer = state.start();

    let message = match (before, timer.state) {
        (CountdownState::Started, _) => "Countdown already running",
        (CountdownState::Paused, _) => "Countdown resumed",
        (_, CountdownState::Finished) => "Countdown finished immediately",
        _ => "Countdown started",
    };
    info!("Start endpoint called - {}", message);

    Json(ApiResponse::ok(message.to_string(), timer))
}

/// Handle POST /pause - Pause a running countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.pause();

    let message = match timer.state {
        CountdownState::Paused => "Countdown paused",
        _ => "Countdown not running",
    };
    info!("Pause endpoint called - {}", message);

    Json(ApiResponse::ok(message.to_string(), timer))
}

/// Handle POST /reset - Return to the selected duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let timer = state.reset();
    info!("Reset endpoint called - countdown reset to {}", timer.display);

    Json(ApiResponse::ok("Countdown reset".to_string(), timer))
}

/// Handle POST /alert/dismiss - Acknowledge the completion alert
pub async fn dismiss_alert_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AlertResponse>, StatusCode> {
    match state.dismiss_alert() {
        Ok(dismissed) => {
            info!("Alert dismissed: {}", dismissed.is_some());
            Ok(Json(AlertResponse { dismissed }))
        }
        Err(e) => {
            error!("Failed to dismiss alert: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /picker - Return picker columns and the current selection
pub async fn picker_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PickerResponse>, StatusCode> {
    match state.get_selection() {
        Ok(selection) => Ok(Json(PickerResponse {
            columns: picker_columns(),
            selection,
        })),
        Err(e) => {
            error!("Failed to get picker selection: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let alert = match state.get_alert() {
        Ok(a) => a,
        Err(e) => {
            error!("Failed to get alert: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: state.current_timer(),
        alert,
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
