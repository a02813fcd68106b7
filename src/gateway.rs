//! OpenWebUI gateway client
//!
//! Talks to an OpenWebUI-compatible HTTP gateway with bearer authentication:
//! `POST /api/chat/completions` for chat and `GET /api/models` for the model
//! listing.

use crate::chat::{ChatCompletion, ChatRequest, ModelEntry, ModelList, TokenUsage};
use crate::config::GatewayConfig;
use crate::error::{Error, Result};
use crate::llm_client::LlmClient;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Client for an OpenWebUI-compatible gateway
pub struct GatewayClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: GatewayConfig,
}

/// Structured-but-optional decode of a chat-completions response
#[derive(Deserialize)]
struct GatewayChatResponse {
    choices: Option<Vec<GatewayChoice>>,
    usage: Option<GatewayUsage>,
}

#[derive(Deserialize)]
struct GatewayChoice {
    message: Option<GatewayMessage>,
}

#[derive(Deserialize)]
struct GatewayMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct GatewayUsage {
    prompt_tokens: Option<u64>,
    completion_tokens: Option<u64>,
}

/// Structured-but-optional decode of a models-listing response
#[derive(Deserialize)]
struct GatewayModelsResponse {
    data: Option<Vec<GatewayModel>>,
}

#[derive(Deserialize)]
struct GatewayModel {
    id: String,
    ollama: Option<GatewayModelOllama>,
}

#[derive(Deserialize)]
struct GatewayModelOllama {
    details: Option<GatewayModelDetails>,
}

#[derive(Deserialize)]
struct GatewayModelDetails {
    parameter_size: Option<String>,
}

impl GatewayClient {
    /// Create a new client from `JWT_TOKEN` and `BASE_URL`
    pub fn from_env() -> Result<Self> {
        let config = GatewayConfig::from_env()?;
        Self::new(config)
    }

    /// Create a new client with the given configuration
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.config.token())
    }

    async fn read_payload(response: reqwest::Response) -> Result<serde_json::Value> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Api { status, body });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl LlmClient for GatewayClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion> {
        let url = format!("{}/api/chat/completions", self.config.base_url);
        debug!(%url, model = %request.model, "sending chat request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.bearer())
            .json(&request)
            .send()
            .await?;
        let raw = Self::read_payload(response).await?;

        let decoded: GatewayChatResponse =
            serde_json::from_value(raw.clone()).map_err(|_| Error::malformed(raw.clone()))?;
        let text = decoded
            .choices
            .and_then(|mut choices| {
                if choices.is_empty() {
                    None
                } else {
                    choices.swap_remove(0).message.and_then(|m| m.content)
                }
            })
            .ok_or_else(|| Error::malformed(raw.clone()))?;
        let usage = decoded.usage.and_then(|u| {
            match (u.prompt_tokens, u.completion_tokens) {
                (Some(prompt), Some(completion)) => Some(TokenUsage::new(prompt, completion)),
                _ => None,
            }
        });

        Ok(ChatCompletion { text, usage, raw })
    }

    async fn list_models(&self) -> Result<ModelList> {
        let url = format!("{}/api/models", self.config.base_url);
        debug!(%url, "listing models");

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.bearer())
            .send()
            .await?;
        let raw = Self::read_payload(response).await?;

        let decoded: GatewayModelsResponse =
            serde_json::from_value(raw.clone()).map_err(|_| Error::malformed(raw.clone()))?;
        let models = decoded
            .data
            .ok_or_else(|| Error::malformed(raw.clone()))?
            .into_iter()
            .map(|model| ModelEntry {
                id: model.id,
                parameter_size: model
                    .ollama
                    .and_then(|o| o.details)
                    .and_then(|d| d.parameter_size),
            })
            .collect();

        Ok(ModelList { models, raw })
    }

    fn client_type(&self) -> &str {
        "openwebui"
    }

    fn endpoint(&self) -> &str {
        &self.config.base_url
    }
}
