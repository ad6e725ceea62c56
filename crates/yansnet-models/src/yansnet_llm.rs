//! YANSNET LLM depression classifier
//!
//! Sends the text to an OpenAI-compatible chat completions endpoint and asks
//! the model for a JSON verdict:
//!
//! ```text
//! {"prediction": 1, "confidence": 0.87, "reasoning": "..."}
//! ```
//!
//! Models do not always honour the JSON-only instruction, so the answer is
//! parsed leniently: the first `{...}` object in the reply is extracted and
//! the prediction may be a number, a boolean or a label string.

use crate::classifier::DepressionClassifier;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use yansnet_core::{Error, HealthStatus, ModelInfo, Prediction, PredictionLabel, Result};

pub const MODEL_NAME: &str = "YANSNET LLM";
pub const MODEL_VERSION: &str = "1.0.0";
pub const MODEL_AUTHOR: &str = "YANSNET";

const SYSTEM_PROMPT: &str = "You are a clinical screening assistant that detects signs of \
depression in short social media posts. Analyse the user's text and answer ONLY with a JSON \
object of the form {\"prediction\": 0 or 1, \"confidence\": number between 0 and 1, \
\"reasoning\": short explanation}. Use prediction 1 when the text shows signs of depression \
(hopelessness, loss of interest, persistent sadness, self-harm ideation) and 0 otherwise.";

/// Maximum length of an upstream error body kept in error messages
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for the LLM backend
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; the model cannot be built without one
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens in the answer
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.0
}

fn default_max_tokens() -> u32 {
    256
}

fn default_timeout_secs() -> u64 {
    60
}

/// LLM-backed depression classifier
pub struct YansnetLlmModel {
    info: ModelInfo,
    settings: LlmSettings,
    api_key: String,
    endpoint: String,
    client: reqwest::Client,
}

impl YansnetLlmModel {
    /// Build the model from settings; fails without an API key
    pub fn new(settings: LlmSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::config("LLM API key is not set (YANSNET_LLM__API_KEY or llm.api_key)")
            })?;

        if settings.base_url.trim().is_empty() {
            return Err(Error::config("LLM base_url must not be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        let endpoint = format!("{}/chat/completions", settings.base_url.trim_end_matches('/'));

        Ok(Self {
            info: ModelInfo::new(MODEL_NAME, MODEL_VERSION, MODEL_AUTHOR).with_description(
                "Depression detection by prompting an OpenAI-compatible chat model",
            ),
            settings,
            api_key,
            endpoint,
            client,
        })
    }

    fn request_body(&self, text: &str) -> Value {
        json!({
            "model": self.settings.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": text },
            ],
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
            "response_format": { "type": "json_object" },
        })
    }

    async fn complete(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            body.truncate(floor_char_boundary(&body, MAX_ERROR_BODY));
            warn!("LLM backend returned {}: {}", status, body);
            return Err(Error::inference(format!(
                "LLM backend returned {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletion = response.json().await.map_err(map_reqwest_error)?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::inference("LLM backend returned no content"))
    }
}

#[async_trait]
impl DepressionClassifier for YansnetLlmModel {
    fn info(&self) -> &ModelInfo {
        &self.info
    }

    async fn predict(&self, text: &str) -> Result<Prediction> {
        if text.trim().is_empty() {
            return Err(Error::invalid_input("text must not be empty"));
        }

        let start = Instant::now();
        let content = self.complete(text).await?;
        debug!("LLM answer: {}", content);

        let verdict = parse_verdict(&content)?;
        let mut prediction = Prediction::new(verdict.label, verdict.confidence, MODEL_NAME)
            .with_latency_ms(start.elapsed().as_millis() as u64);
        prediction.reasoning = verdict.reasoning;

        Ok(prediction)
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        // Local check only; probing the backend would spend tokens.
        Ok(HealthStatus::healthy().with_detail(format!(
            "provider model {} at {}",
            self.settings.model, self.settings.base_url
        )))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else if err.is_decode() {
        Error::inference(format!("invalid response from LLM backend: {}", err))
    } else {
        Error::inference(format!("LLM request failed: {}", err))
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Parsed model answer
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub label: PredictionLabel,
    pub confidence: f32,
    pub reasoning: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    prediction: Value,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Extract the verdict from a raw model answer.
///
/// Decodes the first `{...}` object that parses as a verdict; text before
/// and after it is ignored.
pub fn parse_verdict(content: &str) -> Result<Verdict> {
    let mut last_error = None;
    for (start, _) in content.match_indices('{') {
        let mut stream =
            serde_json::Deserializer::from_str(&content[start..]).into_iter::<RawVerdict>();
        match stream.next() {
            Some(Ok(raw)) => return verdict_from_raw(raw),
            Some(Err(e)) => last_error = Some(e),
            None => {}
        }
    }

    Err(match last_error {
        Some(e) => Error::inference(format!("malformed model answer: {}", e)),
        None => Error::inference(format!("no JSON object in model answer: {}", content)),
    })
}

fn verdict_from_raw(raw: RawVerdict) -> Result<Verdict> {
    let label = parse_label(&raw.prediction)?;
    let confidence = raw.confidence.unwrap_or(0.5).clamp(0.0, 1.0) as f32;

    Ok(Verdict {
        label,
        confidence,
        reasoning: raw.reasoning.filter(|r| !r.trim().is_empty()),
    })
}

fn parse_label(value: &Value) -> Result<PredictionLabel> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .filter(|class| *class == 0 || *class == 1)
            .map(PredictionLabel::from_class),
        Value::Bool(b) => Some(PredictionLabel::from_class(*b as i64)),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "0" | "normal" | "not depressed" | "no" | "false" => Some(PredictionLabel::Normal),
            "1" | "depression" | "depressed" | "yes" | "true" => Some(PredictionLabel::Depression),
            _ => None,
        },
        _ => None,
    }
    .ok_or_else(|| Error::inference(format!("unexpected prediction value: {}", value)))
}
