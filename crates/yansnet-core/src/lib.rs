//! YANSNET Core
//!
//! Types shared across the YANSNET depression detection service.
//!
//! This crate provides:
//! - The service-wide error type and result alias
//! - Prediction and health value objects returned by every classifier
//! - Model metadata summaries used by the registry listings

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{HealthState, HealthStatus, ModelInfo, ModelSummary, Prediction, PredictionLabel};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{HealthStatus, ModelInfo, Prediction, PredictionLabel};
}
