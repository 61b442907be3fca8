//! Tournament Clock - a drift-free poker tournament clock served over HTTP
//! 
//! This is the main entry point for the tournament-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use tournament_clock::{
    api::create_router,
    clock::{
        JsonFileStore, LevelIndexPersistence, SilentSink, SystemTimeSource, ToneSink,
        TournamentClock,
    },
    config::Config,
    levels::LevelSequence,
    services::{check_command_available, NoopWakeLock, SoxToneSink, SystemdInhibitLock, WakeLock},
    state::AppState,
    tasks::clock_ticker_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tournament_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting tournament-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, levels={}, poll={}ms",
          config.host, config.port, config.levels.display(), config.poll_interval_ms);

    // The only failure the operator ever sees
    let levels = match LevelSequence::from_json_file(&config.levels) {
        Ok(levels) => levels,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    info!("Loaded {} blind levels", levels.len());

    // Audio is optional; without a player the cues are skipped
    let sink: Arc<dyn ToneSink> = if config.no_audio {
        info!("Audio cues disabled");
        Arc::new(SilentSink)
    } else if let Err(e) = check_command_available("play", "--version").await {
        warn!("{}, audio cues disabled", e);
        Arc::new(SilentSink)
    } else {
        Arc::new(SoxToneSink::new())
    };

    let wake_lock: Arc<dyn WakeLock> = if config.no_wake_lock {
        Arc::new(NoopWakeLock)
    } else {
        Arc::new(SystemdInhibitLock::new())
    };

    let persistence = LevelIndexPersistence::new(
        Arc::new(JsonFileStore::new(&config.state_file)),
        config.storage_key.clone(),
    );
    let clock = TournamentClock::new(levels, persistence, sink);

    // Create application state
    let state = Arc::new(AppState::new(
        clock,
        Arc::new(SystemTimeSource),
        wake_lock,
        config.poll_interval(),
        config.port,
        config.host.clone(),
    ));
    state.wake_lock.acquire();

    // Start the clock ticker background task
    let ticker_state = Arc::clone(&state);
    tokio::spawn(async move {
        clock_ticker_task(ticker_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /clock                  - Current clock face");
    info!("  POST /clock/toggle           - Start or pause");
    info!("  POST /clock/previous         - Step back one level");
    info!("  POST /clock/next             - Step forward one level");
    info!("  POST /clock/add-minute       - Add a minute");
    info!("  POST /clock/subtract-minute  - Subtract a minute");
    info!("  POST /display/fullscreen     - Toggle fullscreen");
    info!("  GET  /status                 - Clock and server status");
    info!("  GET  /health                 - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    state.wake_lock.release();
    info!("Server shutdown complete");
    Ok(())
}
