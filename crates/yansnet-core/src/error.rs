//! Error types for YANSNET

/// Result type alias using YANSNET's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for model registration, resolution and inference
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requested model is not registered, or no default is set
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// A model with the same name is already registered
    #[error("model already registered: {0}")]
    DuplicateModel(String),

    /// Caller supplied unusable input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The inference backend failed or answered with something unusable
    #[error("inference error: {0}")]
    Inference(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Timeout errors
    #[error("operation timed out")]
    Timeout,

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new model-not-found error
    pub fn model_not_found(name: impl Into<String>) -> Self {
        Self::ModelNotFound(name.into())
    }

    /// Create a new invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short machine-readable kind, used as a metrics label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelNotFound(_) => "model_not_found",
            Self::DuplicateModel(_) => "duplicate_model",
            Self::InvalidInput(_) => "invalid_input",
            Self::Inference(_) => "inference",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
            Self::Timeout => "timeout",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = Error::model_not_found("GCN");
        assert_eq!(err.to_string(), "model not found: GCN");

        let err = Error::config("missing api key");
        assert_eq!(err.to_string(), "configuration error: missing api key");
    }

    #[test]
    fn test_serde_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{oops");
        let err: Error = parse.unwrap_err().into();
        assert_eq!(err.kind(), "serialization");
    }
}
