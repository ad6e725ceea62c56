use crate::config::Settings;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use yansnet_models::ModelRegistry;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub settings: Arc<Settings>,

    /// Models registered at startup; read-only from here on
    pub registry: Arc<ModelRegistry>,

    /// Prometheus handle for rendering `/metrics`, when the exporter is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(settings: Settings, registry: ModelRegistry) -> Self {
        Self {
            settings: Arc::new(settings),
            registry: Arc::new(registry),
            metrics_handle: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
