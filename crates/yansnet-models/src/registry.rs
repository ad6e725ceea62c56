//! Model registry: name -> descriptor, plus the default pointer

use crate::classifier::DepressionClassifier;
use crate::descriptor::ModelDescriptor;
use futures::future::join_all;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use yansnet_core::{Error, HealthStatus, ModelSummary, Result};

/// Upper bound for a single model's health check
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// What to do when a name is registered twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail the second registration
    #[default]
    Reject,
    /// Swap the existing entry for the new one
    Replace,
}

/// Registry of all classifiers available to the API.
///
/// Written only during startup (`&mut self`), then shared behind an `Arc`
/// and read concurrently by request handlers.
pub struct ModelRegistry {
    models: HashMap<String, ModelDescriptor>,
    default_model: Option<String>,
    duplicate_policy: DuplicatePolicy,
    health_timeout: Duration,
}

impl ModelRegistry {
    /// Create an empty registry with the default policies
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
            default_model: None,
            duplicate_policy: DuplicatePolicy::default(),
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }

    /// Set the duplicate-name policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Set the per-model health check timeout
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Register a descriptor under its name, optionally making it the default
    pub fn register(&mut self, mut descriptor: ModelDescriptor, set_as_default: bool) -> Result<()> {
        let name = descriptor.name().to_string();
        if name.trim().is_empty() {
            return Err(Error::invalid_input("model name must not be empty"));
        }

        descriptor.is_default = false;
        if let Some(existing) = self.models.get(&name) {
            match self.duplicate_policy {
                DuplicatePolicy::Reject => return Err(Error::DuplicateModel(name)),
                DuplicatePolicy::Replace => {
                    warn!(
                        "Replacing model {} v{} with v{}",
                        name,
                        existing.version(),
                        descriptor.version()
                    );
                    descriptor.is_default = existing.is_default;
                }
            }
        }

        debug!(
            "Registered model: {} v{} by {}",
            name,
            descriptor.version(),
            descriptor.author()
        );
        self.models.insert(name.clone(), descriptor);

        if set_as_default {
            self.set_default(&name)?;
        }

        Ok(())
    }

    /// Make `name` the default, clearing the previous default
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.models.contains_key(name) {
            return Err(Error::model_not_found(name));
        }

        if let Some(previous) = self.default_model.take() {
            if let Some(descriptor) = self.models.get_mut(&previous) {
                descriptor.is_default = false;
            }
        }

        if let Some(descriptor) = self.models.get_mut(name) {
            descriptor.is_default = true;
        }
        self.default_model = Some(name.to_string());
        debug!("Default model set to {}", name);

        Ok(())
    }

    /// Name of the default model, if any
    pub fn default_model(&self) -> Option<&str> {
        self.default_model.as_deref()
    }

    /// Snapshot of every registered model keyed by name
    pub fn list_models(&self) -> BTreeMap<String, ModelSummary> {
        self.models
            .iter()
            .map(|(name, descriptor)| (name.clone(), descriptor.summary()))
            .collect()
    }

    /// Registered names in sorted order
    pub fn model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn get(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.get(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Classifier for `name`, or for the default when no name is given.
    ///
    /// A blank name is treated as absent.
    pub fn resolve(&self, name: Option<&str>) -> Result<Arc<dyn DepressionClassifier>> {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => self
                .default_model
                .as_deref()
                .ok_or_else(|| Error::model_not_found("no default model registered"))?,
        };

        self.models
            .get(name)
            .map(|descriptor| Arc::clone(descriptor.classifier()))
            .ok_or_else(|| Error::model_not_found(name))
    }

    /// Health of a single model
    pub async fn health_check(&self, name: &str) -> Result<HealthStatus> {
        let descriptor = self
            .models
            .get(name)
            .ok_or_else(|| Error::model_not_found(name))?;

        Ok(guarded_health_check(
            name,
            Arc::clone(descriptor.classifier()),
            self.health_timeout,
        )
        .await)
    }

    /// Health of every model, checked concurrently.
    ///
    /// Errors, panics and timeouts are reported as unhealthy entries; the
    /// aggregate always contains one entry per registered model.
    pub async fn health_check_all(&self) -> BTreeMap<String, HealthStatus> {
        let checks = self.models.iter().map(|(name, descriptor)| {
            let classifier = Arc::clone(descriptor.classifier());
            let timeout = self.health_timeout;
            async move {
                let status = guarded_health_check(name, classifier, timeout).await;
                (name.clone(), status)
            }
        });

        join_all(checks).await.into_iter().collect()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

async fn guarded_health_check(
    name: &str,
    classifier: Arc<dyn DepressionClassifier>,
    timeout: Duration,
) -> HealthStatus {
    let start = Instant::now();
    let check = AssertUnwindSafe(classifier.health_check()).catch_unwind();

    let status = match tokio::time::timeout(timeout, check).await {
        Ok(Ok(Ok(status))) => status,
        Ok(Ok(Err(e))) => {
            warn!("Health check failed for model {}: {}", name, e);
            HealthStatus::unhealthy(e.to_string())
        }
        Ok(Err(_)) => {
            warn!("Health check panicked for model {}", name);
            HealthStatus::unhealthy("health check panicked")
        }
        Err(_) => {
            warn!(
                "Health check for model {} timed out after {}ms",
                name,
                timeout.as_millis()
            );
            HealthStatus::unhealthy(format!(
                "health check timed out after {}ms",
                timeout.as_millis()
            ))
        }
    };

    match status.latency_ms {
        Some(_) => status,
        None => status.with_latency_ms(start.elapsed().as_millis() as u64),
    }
}
