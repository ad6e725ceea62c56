//! Shared fixtures for router tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use yansnet_api::{build_app, AppState, Settings};
use yansnet_core::{Error, HealthStatus, ModelInfo, Prediction, PredictionLabel, Result};
use yansnet_models::{DepressionClassifier, ModelDescriptor, ModelRegistry};

/// Labels texts mentioning "hopeless" as depression
pub struct KeywordModel {
    info: ModelInfo,
}

impl KeywordModel {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            info: ModelInfo::new(name, version, "tests"),
        }
    }
}

#[async_trait]
impl DepressionClassifier for KeywordModel {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    async fn predict(&self, text: &str) -> Result<Prediction> {
        let label = if text.contains("hopeless") {
            PredictionLabel::Depression
        } else {
            PredictionLabel::Normal
        };
        Ok(Prediction::new(label, 0.9, &self.info.name).with_reasoning("keyword match"))
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        Ok(HealthStatus::healthy())
    }
}

/// Every call fails as if the LLM backend were down
pub struct BrokenModel {
    info: ModelInfo,
}

impl BrokenModel {
    pub fn new(name: &str) -> Self {
        Self {
            info: ModelInfo::new(name, "0.1", "tests"),
        }
    }
}

#[async_trait]
impl DepressionClassifier for BrokenModel {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    async fn predict(&self, _text: &str) -> Result<Prediction> {
        Err(Error::inference("backend unavailable"))
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        Err(Error::inference("backend unavailable"))
    }
}

/// Panics on predict, exercising the panic boundary
pub struct PanickingModel {
    info: ModelInfo,
}

impl PanickingModel {
    pub fn new(name: &str) -> Self {
        Self {
            info: ModelInfo::new(name, "0.1", "tests"),
        }
    }
}

#[async_trait]
impl DepressionClassifier for PanickingModel {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    async fn predict(&self, _text: &str) -> Result<Prediction> {
        panic!("model exploded")
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        Ok(HealthStatus::healthy())
    }
}

/// Registry with "A" (default), "B", a broken model and a panicking model
pub fn populated_registry() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry
        .register(ModelDescriptor::from_classifier(KeywordModel::new("A", "1.0")), true)
        .unwrap();
    registry
        .register(ModelDescriptor::from_classifier(KeywordModel::new("B", "2.0")), false)
        .unwrap();
    registry
        .register(ModelDescriptor::from_classifier(BrokenModel::new("Broken")), false)
        .unwrap();
    registry
        .register(ModelDescriptor::from_classifier(PanickingModel::new("Panicky")), false)
        .unwrap();
    registry
}

pub fn app_with(settings: Settings, registry: ModelRegistry) -> Router {
    build_app(AppState::new(settings, registry))
}

pub fn app() -> Router {
    app_with(Settings::default(), populated_registry())
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Assert the uniform error body shape
pub fn assert_error_body(body: &Value) {
    assert!(body["error"].is_string(), "missing error: {}", body);
    assert!(body["detail"].is_string(), "missing detail: {}", body);
    assert!(body["timestamp"].is_string(), "missing timestamp: {}", body);
}
