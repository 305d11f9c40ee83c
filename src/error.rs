//! Error types for the RAG service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// RAG service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document could not be loaded (missing file, unreadable, invalid PDF)
    #[error("Failed to load '{filename}': {message}")]
    Load { filename: String, message: String },

    /// Embedding provider unreachable or rejected the input
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Vector store unavailable or persisted data is corrupt
    #[error("Vector store error: {0}")]
    Store(String),

    /// Language-model call failed (network, auth, quota, malformed response)
    #[error("Answer generation failed: {0}")]
    Generation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a load error
    pub fn load(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Whether retrying the same request could succeed. Embedding, LLM and
    /// transport failures are transient; a corrupt store or bad input is not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Embedding(_) | Self::Generation(_) | Self::Http(_)
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Status codes map per error kind; the body keeps the reference
        // `{"error": string}` shape so existing clients can parse failures.
        let status = match &self {
            Error::Config(_) | Error::Load { .. } | Error::Json(_) => StatusCode::BAD_REQUEST,
            Error::Generation(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Http(_) => StatusCode::BAD_GATEWAY,
            Error::Embedding(_) | Error::Store(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_failures_are_retryable() {
        assert!(Error::embedding("connection refused").is_retryable());
        assert!(Error::generation("model timed out").is_retryable());
        assert!(!Error::store("corrupt index file").is_retryable());
        assert!(!Error::load("a.pdf", "not a PDF").is_retryable());
    }
}
