//! Error boundary for the HTTP façade
//!
//! Every failure leaving a handler is turned into the same body shape:
//! `{"error": ..., "detail": ..., "timestamp": ...}`.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::any::Any;
use tracing::{error, warn};
use yansnet_core::Error;

/// Current UTC time as an ISO-8601 string
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Uniform error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub detail: String,
    pub timestamp: String,
}

/// Errors returned by route handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Registry, model or inference failure
    #[error(transparent)]
    Core(#[from] Error),

    /// Request body could not be extracted
    #[error("{detail}")]
    Rejection { status: StatusCode, detail: String },

    /// No route matched
    #[error("no route for {0}")]
    RouteNotFound(String),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Status code and generic message for this error
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Core(err) => match err {
                Error::ModelNotFound(_) => (StatusCode::NOT_FOUND, "Model not found"),
                Error::InvalidInput(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Invalid input"),
                Error::Inference(_) => (StatusCode::BAD_GATEWAY, "Inference backend error"),
                Error::Timeout => (StatusCode::GATEWAY_TIMEOUT, "Inference timed out"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            },
            ApiError::Rejection { status, .. } => (*status, "Invalid request"),
            ApiError::RouteNotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Core(err) => err.kind(),
            ApiError::Rejection { .. } => "rejection",
            ApiError::RouteNotFound(_) => "route_not_found",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejection {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let detail = self.to_string();

        if status.is_server_error() {
            error!("Unhandled error ({}): {}", status, detail);
        } else {
            warn!("Request failed ({}): {}", status, detail);
        }
        metrics::counter!("yansnet_errors_total", "kind" => self.kind()).increment(1);

        let body = ErrorBody {
            error: message.to_string(),
            detail,
            timestamp: utc_timestamp(),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON extractor whose rejections use the uniform error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Response for a handler that panicked
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(detail).into_response()
}
