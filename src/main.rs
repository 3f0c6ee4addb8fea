//! Countdown Timer - a countdown state machine with an HTTP control surface
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::display_update_task,
    utils::shutdown_signal,
};

// The countdown is driven by a single event loop
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, duration={}min {}sec, tick={}ms",
          config.host, config.port, config.minutes, config.seconds, config.tick_ms);

    // Create application state
    let selection = config.selection()?;
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        selection,
        config.tick_interval(),
    ));

    // Start the display update background task
    let display_state = Arc::clone(&state);
    tokio::spawn(async move {
        display_update_task(display_state).await;
    });

    if config.autostart {
        // Let the display task subscribe before the first event goes out
        tokio::task::yield_now().await;
        state.start();
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /duration      - Set picker minutes and seconds");
    info!("  POST /start         - Start or resume the countdown");
    info!("  POST /pause         - Pause the countdown");
    info!("  POST /reset         - Reset to the selected duration");
    info!("  POST /alert/dismiss - Dismiss the completion alert");
    info!("  GET  /picker        - Picker columns and selection");
    info!("  GET  /status        - Current timer status");
    info!("  GET  /health        - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("{:#}", e),
            }
        }
    }

    state.reset();
    info!("Server shutdown complete");
    Ok(())
}
