//! Error types for Graph API operations.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors produced by directory operations.
///
/// The remote-facing failures fall into two tiers: [`GraphError::Service`]
/// for any non-success response from Graph or the identity platform, and
/// [`GraphError::Http`] / [`GraphError::Decode`] for everything that failed
/// before a response could be interpreted.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The Graph or identity service returned a non-success response.
    #[error("Graph API returned {status}: {message}")]
    Service { status: StatusCode, message: String },

    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Missing or invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A directory user lookup returned no match.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The service accepted the request but returned no body.
    #[error("Service accepted the request but returned no body")]
    EmptyResponse,
}

/// Graph error envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl GraphError {
    /// Build a [`GraphError::Service`] from a non-success response body,
    /// extracting the Graph error envelope when present.
    pub(crate) fn service(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) if !envelope.error.message.is_empty() => {
                format!("{}: {}", envelope.error.code, envelope.error.message)
            }
            _ => body.to_string(),
        };

        Self::Service { status, message }
    }
}
