//! Mock classifiers for testing
//!
//! Configurable implementations of the DepressionClassifier trait for
//! exercising the registry, startup registration and health aggregation.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use yansnet_core::{Error, HealthStatus, ModelInfo, Prediction, PredictionLabel, Result};
use yansnet_models::DepressionClassifier;

/// A configurable mock classifier
pub struct MockModel {
    info: ModelInfo,
    confidence: f32,
    health_latency: Option<Duration>,
    call_count: AtomicU32,
}

impl MockModel {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            info: ModelInfo::new(name, version, "mock-author"),
            confidence: 0.9,
            health_latency: None,
            call_count: AtomicU32::new(0),
        }
    }

    pub fn with_author(mut self, author: &str) -> Self {
        self.info.author = author.to_string();
        self
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Delay every health check by `latency`
    pub fn with_health_latency(mut self, latency: Duration) -> Self {
        self.health_latency = Some(latency);
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DepressionClassifier for MockModel {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    async fn predict(&self, text: &str) -> Result<Prediction> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        // Keyword scoring so tests can steer the label
        let label = if text.to_lowercase().contains("hopeless") {
            PredictionLabel::Depression
        } else {
            PredictionLabel::Normal
        };

        Ok(Prediction::new(label, self.confidence, &self.info.name))
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        if let Some(latency) = self.health_latency {
            tokio::time::sleep(latency).await;
        }
        Ok(HealthStatus::healthy())
    }
}

/// A classifier whose every call fails
pub struct FailingModel {
    info: ModelInfo,
    error_message: String,
}

impl FailingModel {
    pub fn new(name: &str) -> Self {
        Self {
            info: ModelInfo::new(name, "0.0.1", "mock-author"),
            error_message: "Simulated model failure".to_string(),
        }
    }

    pub fn with_error(mut self, message: &str) -> Self {
        self.error_message = message.to_string();
        self
    }
}

#[async_trait]
impl DepressionClassifier for FailingModel {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    async fn predict(&self, _text: &str) -> Result<Prediction> {
        Err(Error::inference(&self.error_message))
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        Err(Error::inference(&self.error_message))
    }
}

/// A classifier that panics during its health check
pub struct PanickingModel {
    info: ModelInfo,
}

impl PanickingModel {
    pub fn new(name: &str) -> Self {
        Self {
            info: ModelInfo::new(name, "0.0.1", "mock-author"),
        }
    }
}

#[async_trait]
impl DepressionClassifier for PanickingModel {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    async fn predict(&self, _text: &str) -> Result<Prediction> {
        panic!("predict exploded")
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        panic!("health check exploded")
    }
}
