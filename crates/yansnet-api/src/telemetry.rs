//! Logging and metrics initialization

use crate::config::LogFormat;
use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives for the given level; `verbose` forces debug
pub fn filter_directives(log_level: &str, verbose: bool) -> String {
    let level = if verbose {
        "debug".to_string()
    } else {
        log_level.to_lowercase()
    };
    format!("yansnet_api={level},yansnet_models={level},yansnet_core={level},tower_http={level}")
}

/// Initialize tracing/logging; `RUST_LOG` wins unless `verbose` is set
pub fn init_tracing(log_level: &str, format: LogFormat, verbose: bool) {
    let directives = filter_directives(log_level, verbose);
    let filter = if verbose {
        EnvFilter::new(directives)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Install the Prometheus recorder and return handle for rendering
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "yansnet_requests_total",
        "Total number of requests by endpoint"
    );
    metrics::describe_counter!(
        "yansnet_predictions_total",
        "Total number of predictions by model and label"
    );
    metrics::describe_histogram!(
        "yansnet_prediction_latency_ms",
        metrics::Unit::Milliseconds,
        "Prediction latency in milliseconds by model"
    );
    metrics::describe_counter!("yansnet_errors_total", "Total number of errors by kind");

    info!("Metrics exporter initialized");
    Ok(handle)
}
