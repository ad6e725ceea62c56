//! Classifier trait shared by every registered model

use async_trait::async_trait;
use yansnet_core::{HealthStatus, ModelInfo, Prediction, Result};

/// Contract every depression classifier must satisfy
#[async_trait]
pub trait DepressionClassifier: Send + Sync {
    /// Static metadata (name, version, author)
    fn info(&self) -> &ModelInfo;

    /// Get the model name
    fn name(&self) -> &str {
        &self.info().name
    }

    /// Classify a single text
    async fn predict(&self, text: &str) -> Result<Prediction>;

    /// Classify several texts in order, stopping at the first failure
    async fn predict_batch(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        let mut predictions = Vec::with_capacity(texts.len());
        for text in texts {
            predictions.push(self.predict(text).await?);
        }
        Ok(predictions)
    }

    /// Report whether the model is able to serve predictions
    async fn health_check(&self) -> Result<HealthStatus>;
}
