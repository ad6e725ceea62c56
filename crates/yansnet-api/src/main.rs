//! YANSNET API server
//!
//! Registers the built-in models, then serves the depression detection API
//! until Ctrl+C or SIGTERM.

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use yansnet_api::cli::Cli;
use yansnet_api::{build_app, lifecycle, telemetry, AppState, Settings};
use yansnet_models::builtin_factories;

#[tokio::main]
async fn main() -> Result<()> {
    // Environment from .env must be visible before configuration is read
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = Settings::load(&cli.config)?.with_overrides(cli.host.clone(), cli.port);
    telemetry::init_tracing(&settings.log_level, settings.log_format, cli.verbose);
    info!("Configuration loaded from {}", cli.config);

    let registry = lifecycle::build_registry(&settings, &builtin_factories());

    let mut state = AppState::new(settings.clone(), registry);
    match telemetry::init_metrics() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => warn!("Metrics disabled: {}", e),
    }

    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind((settings.host.as_str(), settings.port)).await?;
    lifecycle::log_ready(listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    lifecycle::on_shutdown();
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("Shutdown signal received, stopping server...");
}
