//! Service-level routes: root, health, metrics and fallback

use crate::error::{utc_timestamp, ApiError};
use crate::state::AppState;
use axum::{extract::State, http::Uri, Json};
use serde::Serialize;
use std::collections::BTreeMap;
use yansnet_core::HealthStatus;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub docs: String,
    pub health: String,
}

pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: "Depression Detection API".to_string(),
        version: state.settings.api_version.clone(),
        docs: "/docs".to_string(),
        health: "/health".to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub timestamp: String,
    pub models: ModelsHealth,
}

#[derive(Debug, Serialize)]
pub struct ModelsHealth {
    pub total: usize,
    pub available: Vec<String>,
    pub health: BTreeMap<String, HealthStatus>,
}

/// Aggregate health.
///
/// Top-level status is always "healthy"; degraded models only show up in
/// the per-model map.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    metrics::counter!("yansnet_requests_total", "endpoint" => "health").increment(1);

    let health = state.registry.health_check_all().await;
    let available = state.registry.model_names();

    Json(HealthResponse {
        status: "healthy",
        version: state.settings.api_version.clone(),
        timestamp: utc_timestamp(),
        models: ModelsHealth {
            total: available.len(),
            available,
            health,
        },
    })
}

/// Prometheus text exposition
pub async fn metrics(State(state): State<AppState>) -> String {
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

pub async fn fallback(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
