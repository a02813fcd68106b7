//! Error types shared by both chat binaries

use thiserror::Error;

/// Result type alias for llm-chat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for llm-chat
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid required setting. Displays the bare message so the
    /// CLI surface stays identical to the documented diagnostics.
    #[error("{0}")]
    Config(String),

    /// Network or transport failure
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status from the serving endpoint
    #[error("Request failed with status {status}: {body}")]
    Api {
        /// HTTP status code returned by the endpoint
        status: reqwest::StatusCode,
        /// Response body, as text, for diagnostics
        body: String,
    },

    /// Response payload lacking the expected shape
    #[error("Unexpected response format")]
    MalformedResponse {
        /// The raw payload, surfaced in debug mode
        raw: serde_json::Value,
    },

    /// Failure building or flushing the OTLP trace pipeline
    #[error("Tracing error: {0}")]
    Tracing(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a malformed-response error carrying the raw payload
    pub fn malformed(raw: serde_json::Value) -> Self {
        Self::MalformedResponse { raw }
    }

    /// Create a tracing error
    pub fn tracing(msg: impl Into<String>) -> Self {
        Self::Tracing(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_bare_message() {
        let err = Error::config("JWT_TOKEN not found in .env file");
        assert_eq!(err.to_string(), "JWT_TOKEN not found in .env file");
    }

    #[test]
    fn malformed_response_displays_fixed_message() {
        let err = Error::malformed(serde_json::json!({}));
        assert_eq!(err.to_string(), "Unexpected response format");
    }
}
