//! Symposium Central HTTP server.

use std::future::IntoFuture;
use std::time::Duration;
use symposium_site::{build_router, metrics, AppState, Config};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "symposium_site=info,symposium_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Symposium Central server");

    let config = Config::from_env();
    info!(
        data_file = %config.store.path.display(),
        model = %config.assistant.model,
        "Configuration loaded"
    );

    let prometheus = metrics::install_recorder()?;

    if config.admin.token.is_none() {
        warn!("ADMIN_TOKEN is not set; the admin API is open to anyone who can reach the server");
    }

    let state = AppState::from_config(&config).with_metrics(prometheus);

    // Surface a broken database file at startup rather than on first request
    let db = state.store.load().await?;
    info!(
        departments = db.departments.len(),
        events = db.events.len(),
        "Database loaded"
    );

    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .into_future();

    tokio::select! {
        result = server => result?,
        () = async {
            shutdown_signal().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!(timeout_secs = shutdown_timeout.as_secs(), "Graceful shutdown timed out");
        }
    }

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
