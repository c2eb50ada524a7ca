//! # Client Errors
//!
//! Errors raised while talking to the API. Hydration failures are wrapped, not flattened,
//! so callers can still match on the underlying [`HydratorError`].

use resource_hydrator::HydratorError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Hydrator(#[from] HydratorError),

    #[error("Request handler failed: {0}")]
    Handler(String),
}

impl ClientError {
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Resources only see the engine error type. Hydration errors pass through unchanged,
/// everything else becomes an opaque transport failure.
impl From<ClientError> for HydratorError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Hydrator(error) => error,
            other => HydratorError::transport(other),
        }
    }
}
