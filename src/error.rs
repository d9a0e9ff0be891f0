use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const SERVER_ERROR_MESSAGE: &str =
    "Failed to generate due to a server error. Please check your API key and try again.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Failed to generate due to a network error. Please check your connection and try again.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Closed set of failure categories a caller has to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    AuthOrServerError,
    NetworkError,
    UnexpectedError,
}

impl FailureKind {
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::AuthOrServerError => "AUTH_OR_SERVER_ERROR",
            FailureKind::NetworkError => "NETWORK_ERROR",
            FailureKind::UnexpectedError => "UNEXPECTED_ERROR",
        }
    }
}

/// A failed synthesis call.
///
/// `Display` always yields the fixed user-facing message. The fields carry
/// detail for logs only and never contain the credential.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("{}", SERVER_ERROR_MESSAGE)]
    Server { status: u16 },

    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network { detail: String },

    #[error("{}", UNEXPECTED_ERROR_MESSAGE)]
    Unexpected { detail: String },
}

impl SynthesisError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SynthesisError::Server { .. } => FailureKind::AuthOrServerError,
            SynthesisError::Network { .. } => FailureKind::NetworkError,
            SynthesisError::Unexpected { .. } => FailureKind::UnexpectedError,
        }
    }

    pub fn message(&self) -> &'static str {
        match self.kind() {
            FailureKind::AuthOrServerError => SERVER_ERROR_MESSAGE,
            FailureKind::NetworkError => NETWORK_ERROR_MESSAGE,
            FailureKind::UnexpectedError => UNEXPECTED_ERROR_MESSAGE,
        }
    }

    /// Log-only description of what went wrong.
    pub fn detail(&self) -> String {
        match self {
            SynthesisError::Server { status } => format!("remote returned HTTP {}", status),
            SynthesisError::Network { detail } | SynthesisError::Unexpected { detail } => {
                detail.clone()
            }
        }
    }
}

/// Input rejected before any network call is made.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("API key cannot be empty")]
    EmptyCredential,

    #[error("Text cannot be empty")]
    EmptyText,

    #[error("Text too long ({len} chars, max {limit})")]
    TextTooLong { len: usize, limit: usize },

    #[error("Word of {len} chars exceeds the per-request limit of {limit}")]
    WordTooLong { len: usize, limit: usize },
}

/// Outcome of the speech pipeline, which validates before it synthesizes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

impl From<SpeechError> for AppError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::Validation(e) => AppError::Validation(e),
            SpeechError::Synthesis(e) => AppError::Synthesis(e),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", e.to_string()),
            AppError::Synthesis(e) => {
                let status = match e.kind() {
                    FailureKind::AuthOrServerError => StatusCode::BAD_GATEWAY,
                    FailureKind::NetworkError => StatusCode::GATEWAY_TIMEOUT,
                    FailureKind::UnexpectedError => StatusCode::INTERNAL_SERVER_ERROR,
                };
                tracing::error!("Synthesis failed: {} ({})", e.kind().code(), e.detail());
                (status, e.kind().code(), e.message().to_string())
            }
        };

        if status == StatusCode::BAD_REQUEST {
            tracing::warn!("Request rejected: {} - {}", code, message);
        }

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}
