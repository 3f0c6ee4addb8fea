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
        .route("/duration", post(duration_handler))
        .route("/start", post(start_handler))
        .route("/pause", post(pause_handler))
        .route("/reset", post(reset_handler))
        .route("/alert/dismiss", post(dismiss_alert_handler))
        .route("/picker", get(picker_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::display::PickerSelection;

    fn app() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(
            20554,
            "127.0.0.1".to_string(),
            PickerSelection::default(),
            Duration::from_millis(100),
        ));
        (create_router(Arc::clone(&state)), state)
    }

    async fn call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_version() {
        let (router, _) = app();
        let (status, body) = call(&router, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn status_shows_reset_duration() {
        let (router, _) = app();
        let (status, body) = call(&router, "GET", "/status", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["state"], "reset");
        assert_eq!(body["timer"]["display"], "00:01:30.00");
        assert_eq!(body["timer"]["start_enabled"], true);
        assert!(body["alert"].is_null());
    }

    #[tokio::test]
    async fn duration_validates_picker_ranges() {
        let (router, state) = app();

        let (status, body) =
            call(&router, "POST", "/duration", Some(json!({"minutes": 2, "seconds": 5}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["duration_seconds"], 125.0);
        assert_eq!(state.countdown.duration(), Duration::from_secs(125));

        let (status, body) =
            call(&router, "POST", "/duration", Some(json!({"minutes": 0, "seconds": 75}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(state.countdown.duration(), Duration::from_secs(125));
    }

    #[tokio::test(start_paused = true)]
    async fn start_pause_and_reset() {
        let (router, state) = app();

        let (_, body) = call(&router, "POST", "/start", None).await;
        assert_eq!(body["timer"]["state"], "started");
        assert_eq!(body["timer"]["start_enabled"], false);
        assert_eq!(body["message"], "Countdown started");

        let (_, body) = call(&router, "POST", "/start", None).await;
        assert_eq!(body["message"], "Countdown already running");

        tokio::time::sleep(Duration::from_secs(30)).await;
        let (_, body) = call(&router, "POST", "/pause", None).await;
        assert_eq!(body["timer"]["state"], "paused");
        assert_eq!(body["timer"]["display"], "00:01:00.00");

        let (_, body) = call(&router, "POST", "/reset", None).await;
        assert_eq!(body["timer"]["state"], "reset");
        assert_eq!(body["timer"]["remaining_seconds"], 90.0);
        assert_eq!(state.get_last_action().0.as_deref(), Some("reset"));
    }

    #[tokio::test(start_paused = true)]
    async fn status_reports_published_progress() {
        let (router, state) = app();
        tokio::spawn(crate::tasks::display_update_task(Arc::clone(&state)));
        tokio::task::yield_now().await;

        call(&router, "POST", "/start", None).await;
        tokio::time::sleep(Duration::from_millis(2050)).await;

        let (status, body) = call(&router, "GET", "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["state"], "started");
        assert_eq!(body["timer"]["display"], "00:01:28.00");
        assert_eq!(body["timer"], serde_json::to_value(state.current_timer()).unwrap());
    }

    #[tokio::test]
    async fn picker_lists_columns_and_selection() {
        let (router, _) = app();
        let (status, body) = call(&router, "GET", "/picker", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["columns"][1][0], "min");
        assert_eq!(body["columns"][0].as_array().map(Vec::len), Some(61));
        assert_eq!(body["selection"], json!({"minutes": 1, "seconds": 30}));
    }

    #[tokio::test]
    async fn dismiss_clears_alert() {
        let (router, state) = app();
        state.raise_alert().unwrap();

        let (_, body) = call(&router, "GET", "/status", None).await;
        assert_eq!(body["alert"]["action"], "Okay");

        let (status, body) = call(&router, "POST", "/alert/dismiss", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dismissed"]["title"], "Timer Finished");

        let (_, body) = call(&router, "POST", "/alert/dismiss", None).await;
        assert!(body["dismissed"].is_null());
    }
}
