//! Configuration resolution for both chat binaries
//!
//! Settings come from two sources with a fixed precedence: an explicit CLI
//! value wins over the process environment. A `.env` file in the working
//! directory is loaded best-effort before the environment is read.

use crate::error::{Error, Result};
use dotenvy::dotenv;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Default request timeout for both backends
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

fn validate_base_url(base_url: &str) -> Result<()> {
    Url::parse(base_url).map_err(|e| Error::config(format!("Invalid base URL: {e}")))?;
    Ok(())
}

/// Resolved settings for one run against an Ollama endpoint
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server (e.g., "http://localhost:11434")
    pub base_url: String,
    /// Model to chat with
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
}

impl OllamaConfig {
    /// Create a configuration with explicit values
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Merge CLI-supplied values with environment defaults.
    ///
    /// CLI values take precedence over `OLLAMA_BASE_URL` and `DEFAULT_MODEL`.
    /// Fails when either the base URL or the model is absent from both
    /// sources.
    pub fn resolve(cli_base_url: Option<String>, cli_model: Option<String>) -> Result<Self> {
        // Load .env if present so local development picks up defaults
        let _ = dotenv();

        let base_url = cli_base_url
            .or_else(|| std::env::var("OLLAMA_BASE_URL").ok())
            .ok_or_else(|| Error::config("Base URL is required in command line or .env file"))?;
        let model = cli_model
            .or_else(|| std::env::var("DEFAULT_MODEL").ok())
            .ok_or_else(|| Error::config("Model is required in command line or .env file"))?;
        validate_base_url(&base_url)?;

        Ok(Self::new(base_url, model))
    }
}

/// Resolved settings for one run against an OpenWebUI gateway
#[derive(Clone)]
pub struct GatewayConfig {
    /// Base URL of the gateway (e.g., "https://webui.example.com")
    pub base_url: String,
    /// Bearer token presented on every request
    token: SecretString,
    /// Request timeout
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Create a configuration with explicit values
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: SecretString::from(token.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `JWT_TOKEN` and `BASE_URL` from the environment, loading `.env`
    /// first. Both are required; either missing is a fatal configuration
    /// error reported before any network activity.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        let token = std::env::var("JWT_TOKEN")
            .map_err(|_| Error::config("JWT_TOKEN not found in .env file"))?;
        let base_url = std::env::var("BASE_URL")
            .map_err(|_| Error::config("BASE_URL not found in .env file"))?;
        validate_base_url(&base_url)?;

        Ok(Self::new(base_url, token))
    }

    /// Get the bearer token as a string
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("token", &"***REDACTED***")
            .field("timeout", &self.timeout)
            .finish()
    }
}
