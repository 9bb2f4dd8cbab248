pub mod adapter;
pub mod application;
pub mod domain;
pub mod infrastructure;

use adapter::http::{self, AppState};
use application::eventbus::create_event_bus;
use infrastructure::config;
use infrastructure::logging;
use infrastructure::persistence;

/// Load configuration, wire storage and the event bus, then serve HTTP
/// until Ctrl+C or SIGTERM.
pub async fn run() -> anyhow::Result<()> {
    // Configuration first: it decides how logging is set up
    let app_config = config::init()?;
    logging::setup(&app_config.logging);
    config::log_source();

    let repos = persistence::init_storage(&app_config.storage).await?;
    let event_bus = create_event_bus(app_config.events.capacity);
    let state = AppState::new(repos, event_bus);

    let address = app_config.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Listening");

    axum::serve(listener, http::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
