//! Service configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional YAML
//! file, `YANSNET_`-prefixed environment variables (nested keys use `__`,
//! e.g. `YANSNET_LLM__API_KEY`), then CLI overrides.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use yansnet_models::{DuplicatePolicy, LlmSettings};

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// API title shown in logs and documentation
    #[serde(default = "default_api_title")]
    pub api_title: String,

    /// API version reported by `/` and `/health`
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// API description shown in documentation
    #[serde(default = "default_api_description")]
    pub api_description: String,

    /// Comma-separated CORS allow-list; `*` allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Listen address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound for each model's health check
    #[serde(default = "default_health_check_timeout_ms")]
    pub health_check_timeout_ms: u64,

    /// Behaviour when two models register under the same name
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Maximum number of texts in one batch request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// LLM backend used by the YANSNET LLM model
    #[serde(default)]
    pub llm: LlmSettings,
}

impl Settings {
    /// Load configuration from an optional file and the environment
    pub fn load(config_path: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, None)
    }

    /// Load configuration, reading environment variables from `env` instead
    /// of the process environment when given
    pub fn load_with_env(
        config_path: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("YANSNET")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Apply CLI overrides
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Parsed CORS allow-list; empty entries are dropped
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn health_check_timeout(&self) -> Duration {
        Duration::from_millis(self.health_check_timeout_ms)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: error, warn, info, debug, trace",
                    self.log_level
                )))
            }
        }

        if self.health_check_timeout_ms == 0 {
            return Err(ConfigError::Message(
                "health_check_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.max_batch_size == 0 {
            return Err(ConfigError::Message(
                "max_batch_size must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::Message(format!(
                "llm.temperature must be between 0.0 and 2.0, got: {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "llm.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_title: default_api_title(),
            api_version: default_api_version(),
            api_description: default_api_description(),
            cors_origins: default_cors_origins(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            host: default_host(),
            port: default_port(),
            health_check_timeout_ms: default_health_check_timeout_ms(),
            duplicate_policy: DuplicatePolicy::default(),
            max_batch_size: default_max_batch_size(),
            llm: LlmSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

fn default_api_title() -> String {
    "YANSNET Depression Detection API".to_string()
}

fn default_api_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_api_description() -> String {
    "Detects signs of depression in short texts - multi-model architecture".to_string()
}

fn default_cors_origins() -> String {
    "*".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_health_check_timeout_ms() -> u64 {
    5_000
}

fn default_max_batch_size() -> usize {
    32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn empty_env() -> Option<config::Map<String, String>> {
        Some(config::Map::new())
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = Settings::load_with_env("does-not-exist.yaml", empty_env()).unwrap();

        assert_eq!(settings.port, 8000);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.cors_origin_list(), vec!["*".to_string()]);
        assert_eq!(settings.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(settings.health_check_timeout(), Duration::from_secs(5));
        assert!(settings.llm.api_key.is_none());
    }

    #[test]
    fn test_yaml_file_then_env() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            r#"
api_title: "Test API"
port: 9000
cors_origins: "http://localhost:3000, http://localhost:5173,"
duplicate_policy: replace
llm:
  model: "llama-3.1-8b-instant"
  base_url: "https://api.groq.com/openai/v1"
"#
        )
        .unwrap();

        let mut env = config::Map::new();
        env.insert("YANSNET_PORT".to_string(), "9100".to_string());
        env.insert("YANSNET_LLM__API_KEY".to_string(), "sk-env".to_string());
        env.insert("YANSNET_API_VERSION".to_string(), "2.0".to_string());
        env.insert("YANSNET_LLM__TEMPERATURE".to_string(), "0.2".to_string());

        let path = file.path().to_str().unwrap().to_string();
        let settings = Settings::load_with_env(&path, Some(env)).unwrap();

        assert_eq!(settings.api_title, "Test API");
        assert_eq!(settings.port, 9100);
        assert_eq!(settings.api_version, "2.0");
        assert!((settings.llm.temperature - 0.2).abs() < 1e-6);
        assert_eq!(
            settings.cors_origin_list(),
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
        assert_eq!(settings.duplicate_policy, DuplicatePolicy::Replace);
        assert_eq!(settings.llm.model, "llama-3.1-8b-instant");
        assert_eq!(settings.llm.api_key.as_deref(), Some("sk-env"));
        // Untouched nested defaults survive
        assert_eq!(settings.llm.timeout_secs, 60);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut env = config::Map::new();
        env.insert("YANSNET_LOG_LEVEL".to_string(), "verbose".to_string());

        let err = Settings::load_with_env("does-not-exist.yaml", Some(env)).unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut env = config::Map::new();
        env.insert("YANSNET_MAX_BATCH_SIZE".to_string(), "0".to_string());

        assert!(Settings::load_with_env("does-not-exist.yaml", Some(env)).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let settings = Settings::default().with_overrides(Some("127.0.0.1".to_string()), None);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 8000);
    }
}
