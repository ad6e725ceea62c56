//! Registry entry describing one classifier

use crate::classifier::DepressionClassifier;
use std::fmt;
use std::sync::Arc;
use yansnet_core::{ModelInfo, ModelSummary};

/// Metadata plus the capability handle for one registered classifier
pub struct ModelDescriptor {
    info: ModelInfo,
    pub(crate) is_default: bool,
    classifier: Arc<dyn DepressionClassifier>,
}

impl ModelDescriptor {
    /// Describe a classifier using the metadata it reports about itself
    pub fn new(classifier: Arc<dyn DepressionClassifier>) -> Self {
        Self {
            info: classifier.info().clone(),
            is_default: false,
            classifier,
        }
    }

    /// Wrap an owned classifier
    pub fn from_classifier<C>(classifier: C) -> Self
    where
        C: DepressionClassifier + 'static,
    {
        Self::new(Arc::new(classifier))
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn version(&self) -> &str {
        &self.info.version
    }

    pub fn author(&self) -> &str {
        &self.info.author
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn classifier(&self) -> &Arc<dyn DepressionClassifier> {
        &self.classifier
    }

    /// Listing row for this entry
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            version: self.info.version.clone(),
            author: self.info.author.clone(),
            is_default: self.is_default,
            description: self.info.description.clone(),
        }
    }
}

impl fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("info", &self.info)
            .field("is_default", &self.is_default)
            .finish_non_exhaustive()
    }
}
