//! Classification API (`/api/v1`)

use crate::error::{ApiError, ApiJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};
use yansnet_core::{Error, HealthStatus, ModelSummary, Prediction};

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub total: usize,
    pub default: Option<String>,
    pub models: BTreeMap<String, ModelSummary>,
}

pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let models = state.registry.list_models();
    Json(ModelsResponse {
        total: models.len(),
        default: state.registry.default_model().map(str::to_string),
        models,
    })
}

#[derive(Debug, Serialize)]
pub struct ModelDetail {
    pub name: String,
    #[serde(flatten)]
    pub summary: ModelSummary,
}

pub async fn get_model(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ModelDetail>, ApiError> {
    let descriptor = state
        .registry
        .get(&name)
        .ok_or_else(|| Error::model_not_found(&name))?;

    Ok(Json(ModelDetail {
        name: descriptor.name().to_string(),
        summary: descriptor.summary(),
    }))
}

#[derive(Debug, Serialize)]
pub struct ModelHealth {
    pub model: String,
    #[serde(flatten)]
    pub health: HealthStatus,
}

pub async fn model_health(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ModelHealth>, ApiError> {
    let health = state.registry.health_check(&name).await?;
    Ok(Json(ModelHealth { model: name, health }))
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Text to classify
    pub text: String,

    /// Model name; the default model when omitted
    #[serde(default)]
    pub model: Option<String>,
}

/// Classify one text
pub async fn predict(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<PredictRequest>,
) -> Result<Json<Prediction>, ApiError> {
    metrics::counter!("yansnet_requests_total", "endpoint" => "predict").increment(1);

    if req.text.trim().is_empty() {
        return Err(Error::invalid_input("text must not be empty").into());
    }

    let classifier = state.registry.resolve(req.model.as_deref())?;
    debug!("Predicting with model {} ({} chars)", classifier.name(), req.text.len());

    let prediction = classifier.predict(&req.text).await?;
    record_prediction(&prediction);

    Ok(Json(prediction))
}

#[derive(Debug, Deserialize)]
pub struct BatchPredictRequest {
    /// Texts to classify, in order
    pub texts: Vec<String>,

    /// Model name; the default model when omitted
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchPredictResponse {
    pub model: String,
    pub total: usize,
    pub results: Vec<Prediction>,
}

/// Classify several texts with the same model
pub async fn predict_batch(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<BatchPredictRequest>,
) -> Result<Json<BatchPredictResponse>, ApiError> {
    metrics::counter!("yansnet_requests_total", "endpoint" => "predict_batch").increment(1);

    if req.texts.is_empty() {
        return Err(Error::invalid_input("texts must not be empty").into());
    }

    let max = state.settings.max_batch_size;
    if req.texts.len() > max {
        return Err(Error::invalid_input(format!(
            "batch of {} texts exceeds the limit of {}",
            req.texts.len(),
            max
        ))
        .into());
    }

    if let Some(idx) = req.texts.iter().position(|text| text.trim().is_empty()) {
        return Err(Error::invalid_input(format!("texts[{}] must not be empty", idx)).into());
    }

    let classifier = state.registry.resolve(req.model.as_deref())?;
    info!(
        "Batch prediction of {} texts with model {}",
        req.texts.len(),
        classifier.name()
    );

    let results = classifier.predict_batch(&req.texts).await?;
    results.iter().for_each(record_prediction);

    Ok(Json(BatchPredictResponse {
        model: classifier.name().to_string(),
        total: results.len(),
        results,
    }))
}

fn record_prediction(prediction: &Prediction) {
    metrics::counter!(
        "yansnet_predictions_total",
        "model" => prediction.model.clone(),
        "label" => prediction.label.as_str()
    )
    .increment(1);
    metrics::histogram!("yansnet_prediction_latency_ms", "model" => prediction.model.clone())
        .record(prediction.latency_ms as f64);
}
