//! Core types for YANSNET

use serde::{Deserialize, Serialize};

/// Binary outcome of a depression classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionLabel {
    /// No depression signal detected
    Normal,
    /// Depression signal detected
    Depression,
}

impl PredictionLabel {
    /// Numeric class as exposed on the wire (0 = normal, 1 = depression)
    pub fn as_class(&self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Depression => 1,
        }
    }

    /// Map a numeric class back to a label; anything non-zero is positive
    pub fn from_class(class: i64) -> Self {
        if class == 0 {
            Self::Normal
        } else {
            Self::Depression
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Depression => "depression",
        }
    }
}

/// Result of classifying one text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Numeric class (0 or 1)
    pub prediction: u8,

    /// Human-readable class
    pub label: PredictionLabel,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,

    /// Optional short justification produced by the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,

    /// Name of the model that produced this prediction
    pub model: String,

    /// Wall-clock latency of the classification call in milliseconds
    pub latency_ms: u64,
}

impl Prediction {
    /// Create a new prediction, clamping confidence into [0, 1]
    pub fn new(label: PredictionLabel, confidence: f32, model: impl Into<String>) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            prediction: label.as_class(),
            label,
            confidence,
            reasoning: None,
            model: model.into(),
            latency_ms: 0,
        }
    }

    /// Attach the model's reasoning
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// Record the measured latency
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Whether the depression class was predicted
    pub fn is_positive(&self) -> bool {
        self.label == PredictionLabel::Depression
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

/// Health of a single registered model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: HealthState,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: HealthState::Healthy,
            detail: None,
            latency_ms: None,
        }
    }

    pub fn unhealthy(detail: impl Into<String>) -> Self {
        Self {
            status: HealthState::Unhealthy,
            detail: Some(detail.into()),
            latency_ms: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthState::Healthy
    }
}

/// Static metadata every classifier reports about itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Unique name, used as the registry key
    pub name: String,

    /// Free-form version string
    pub version: String,

    /// Free-form attribution
    pub author: String,

    /// One-line description
    #[serde(default)]
    pub description: String,
}

impl ModelInfo {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            author: author.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One row of the registry listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub version: String,
    pub author: String,
    pub is_default: bool,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_clamps_confidence() {
        let p = Prediction::new(PredictionLabel::Depression, 1.7, "m");
        assert_eq!(p.confidence, 1.0);
        assert_eq!(p.prediction, 1);

        let p = Prediction::new(PredictionLabel::Normal, f32::NAN, "m");
        assert_eq!(p.confidence, 0.0);
        assert_eq!(p.prediction, 0);
    }

    #[test]
    fn test_prediction_serializes_label_lowercase() {
        let p = Prediction::new(PredictionLabel::Depression, 0.8, "YANSNET LLM")
            .with_reasoning("persistent hopelessness");
        let json = serde_json::to_value(&p).unwrap();

        assert_eq!(json["label"], "depression");
        assert_eq!(json["prediction"], 1);
        assert_eq!(json["model"], "YANSNET LLM");
        assert_eq!(json["reasoning"], "persistent hopelessness");
    }

    #[test]
    fn test_health_status_omits_empty_fields() {
        let json = serde_json::to_value(HealthStatus::healthy()).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "healthy" }));

        let json = serde_json::to_value(HealthStatus::unhealthy("boom")).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["detail"], "boom");
    }

    #[test]
    fn test_label_from_class() {
        assert_eq!(PredictionLabel::from_class(0), PredictionLabel::Normal);
        assert_eq!(PredictionLabel::from_class(1), PredictionLabel::Depression);
        assert_eq!(PredictionLabel::Depression.as_str(), "depression");
    }
}
