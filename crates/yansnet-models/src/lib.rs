//! YANSNET Models
//!
//! Registry and classifier implementations behind the depression detection API.
//!
//! A [`ModelRegistry`] maps model names to [`ModelDescriptor`]s, each owning a
//! [`DepressionClassifier`]. The registry is populated once at startup from a
//! static table of [`ModelFactory`] entries; a factory that fails to build is
//! logged and skipped so the service can still start with fewer models.

pub mod classifier;
pub mod descriptor;
pub mod factory;
pub mod registry;
pub mod yansnet_llm;

pub use classifier::DepressionClassifier;
pub use descriptor::ModelDescriptor;
pub use factory::{builtin_factories, register_all, ModelFactory, RegistrationReport};
pub use registry::{DuplicatePolicy, ModelRegistry, DEFAULT_HEALTH_TIMEOUT};
pub use yansnet_llm::{LlmSettings, YansnetLlmModel};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::DepressionClassifier;
    pub use crate::descriptor::ModelDescriptor;
    pub use crate::registry::{DuplicatePolicy, ModelRegistry};
    pub use yansnet_core::{HealthStatus, ModelInfo, Prediction, PredictionLabel};
}
