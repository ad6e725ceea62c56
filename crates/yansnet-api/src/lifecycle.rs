//! Startup and shutdown hooks

use crate::config::Settings;
use std::net::SocketAddr;
use tracing::{error, info, warn};
use yansnet_models::{register_all, ModelFactory, ModelRegistry};

const RULE_WIDTH: usize = 70;

/// Build the registry from the factory table and log a summary.
///
/// Never fails: a model that cannot be built is logged and left out, and the
/// service starts with whatever registered (possibly nothing).
pub fn build_registry(settings: &Settings, factories: &[ModelFactory]) -> ModelRegistry {
    let rule = "=".repeat(RULE_WIDTH);
    let thin_rule = "-".repeat(RULE_WIDTH);

    info!("{}", rule);
    info!("{} v{}", settings.api_title, settings.api_version);
    info!("Multi-model architecture");
    info!("{}", rule);
    info!("Registering models...");
    info!("{}", thin_rule);

    let mut registry = ModelRegistry::new()
        .with_duplicate_policy(settings.duplicate_policy)
        .with_health_timeout(settings.health_check_timeout());

    let report = register_all(&mut registry, factories, &settings.llm);
    if !report.failed.is_empty() {
        error!("  Check that the LLM API key is configured (.env or YANSNET_LLM__API_KEY)");
    }

    info!("{}", thin_rule);
    log_summary(&registry);
    info!("{}", rule);

    registry
}

fn log_summary(registry: &ModelRegistry) {
    let models = registry.list_models();
    if models.is_empty() {
        warn!("No models registered!");
        return;
    }

    info!("✓ {} model(s) registered:", models.len());
    for (name, summary) in &models {
        let default_marker = if summary.is_default { " [DEFAULT]" } else { "" };
        info!(
            "  • {} v{} by {}{}",
            name, summary.version, summary.author, default_marker
        );
    }
}

/// Log the listening address and entry points
pub fn log_ready(addr: SocketAddr) {
    info!("✓ API started successfully!");
    info!("Listening on http://{}", addr);
    info!("Documentation: http://{}/docs", addr);
    info!("Available models: http://{}/api/v1/models", addr);
}

pub fn on_shutdown() {
    info!("Shutting down API...");
}
