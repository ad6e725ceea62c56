//! Startup registration of the built-in models

use crate::classifier::DepressionClassifier;
use crate::descriptor::ModelDescriptor;
use crate::registry::ModelRegistry;
use crate::yansnet_llm::{LlmSettings, YansnetLlmModel, MODEL_NAME};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, info};
use yansnet_core::Result;

type BuildFn =
    Box<dyn Fn(&LlmSettings) -> Result<Arc<dyn DepressionClassifier>> + Send + Sync>;

/// Named constructor for one candidate model
pub struct ModelFactory {
    name: String,
    set_as_default: bool,
    build: BuildFn,
}

impl ModelFactory {
    /// Create a factory from a fallible constructor
    pub fn new<F>(name: impl Into<String>, build: F) -> Self
    where
        F: Fn(&LlmSettings) -> Result<Arc<dyn DepressionClassifier>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            set_as_default: false,
            build: Box::new(build),
        }
    }

    /// Register the built model as the default
    pub fn as_default(mut self) -> Self {
        self.set_as_default = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_default(&self) -> bool {
        self.set_as_default
    }
}

/// Models shipped with the service, in registration order.
///
/// Add new classifiers here.
pub fn builtin_factories() -> Vec<ModelFactory> {
    vec![ModelFactory::new(MODEL_NAME, |settings| {
        let model = YansnetLlmModel::new(settings.clone())?;
        Ok(Arc::new(model) as Arc<dyn DepressionClassifier>)
    })
    .as_default()]
}

/// Outcome of a startup registration pass
#[derive(Debug, Default, Clone)]
pub struct RegistrationReport {
    /// Registry names of the models registered successfully
    pub registered: Vec<String>,

    /// Factory name and error for each failure
    pub failed: Vec<(String, String)>,
}

impl RegistrationReport {
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

/// Build and register every factory, continuing past failures
pub fn register_all(
    registry: &mut ModelRegistry,
    factories: &[ModelFactory],
    settings: &LlmSettings,
) -> RegistrationReport {
    let mut report = RegistrationReport::default();

    for factory in factories {
        info!("Registering model: {}", factory.name);

        let built = catch_unwind(AssertUnwindSafe(|| (factory.build)(settings)));
        let outcome = match built {
            Ok(Ok(classifier)) => {
                let descriptor = ModelDescriptor::new(classifier);
                let name = descriptor.name().to_string();
                registry
                    .register(descriptor, factory.set_as_default)
                    .map(|()| name)
                    .map_err(|e| e.to_string())
            }
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err("model constructor panicked".to_string()),
        };

        match outcome {
            Ok(name) => {
                info!("✓ Registered model: {}", name);
                report.registered.push(name);
            }
            Err(e) => {
                error!("✗ Failed to register model {}: {}", factory.name, e);
                report.failed.push((factory.name.clone(), e));
                // Continue with other models rather than failing completely
            }
        }
    }

    info!(
        "Model registry initialized with {}/{} models",
        report.registered.len(),
        factories.len()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use yansnet_core::Error;

    #[test]
    fn test_builtin_table() {
        let factories = builtin_factories();
        assert_eq!(factories.len(), 1);
        assert_eq!(factories[0].name(), "YANSNET LLM");
        assert!(factories[0].is_default());
    }

    #[test]
    fn test_builtin_without_credentials_registers_nothing() {
        let mut registry = ModelRegistry::new();
        let report = register_all(&mut registry, &builtin_factories(), &LlmSettings::default());

        assert!(report.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert!(registry.is_empty());
        assert_eq!(registry.default_model(), None);
    }

    #[test]
    fn test_builtin_with_credentials_is_default() {
        let settings = LlmSettings {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let mut registry = ModelRegistry::new();
        let report = register_all(&mut registry, &builtin_factories(), &settings);

        assert_eq!(report.registered, vec!["YANSNET LLM".to_string()]);
        assert_eq!(registry.default_model(), Some("YANSNET LLM"));
    }

    #[test]
    fn test_report_uses_registry_name() {
        let settings = LlmSettings {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let factories = vec![ModelFactory::new("llm-alias", |settings| {
            let model = YansnetLlmModel::new(settings.clone())?;
            Ok(Arc::new(model) as Arc<dyn DepressionClassifier>)
        })];

        let mut registry = ModelRegistry::new();
        let report = register_all(&mut registry, &factories, &settings);

        assert_eq!(report.registered, vec![MODEL_NAME.to_string()]);
        assert!(registry.get(&report.registered[0]).is_some());
        assert!(registry.get("llm-alias").is_none());
    }

    #[test]
    fn test_panicking_factory_is_isolated() {
        let factories = vec![
            ModelFactory::new("boom", |_| panic!("constructor exploded")),
            ModelFactory::new("config", |_| Err(Error::config("missing key"))),
        ];

        let mut registry = ModelRegistry::new();
        let report = register_all(&mut registry, &factories, &LlmSettings::default());

        assert!(registry.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].0, "boom");
        assert!(report.failed[1].1.contains("missing key"));
    }
}
