//! Ollama chat client
//!
//! Talks to the native Ollama HTTP API: `POST /api/chat` for completions and
//! `GET /api/tags` for the local model listing. Ollama streams by default, so
//! the chat body carries an explicit `"stream": false` to request a single
//! complete response.

use crate::chat::{ChatCompletion, ChatRequest, ModelEntry, ModelList, TokenUsage};
use crate::config::OllamaConfig;
use crate::error::{Error, Result};
use crate::llm_client::LlmClient;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Client for an Ollama-compatible inference endpoint
pub struct OllamaClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: OllamaConfig,
}

/// Wire body for `/api/chat`: the chat request plus the streaming switch
#[derive(Serialize)]
struct OllamaChatBody<'a> {
    #[serde(flatten)]
    request: &'a ChatRequest,
    stream: bool,
}

/// Structured-but-optional decode of an `/api/chat` response
#[derive(Deserialize)]
struct OllamaChatResponse {
    message: Option<OllamaMessage>,
    prompt_eval_count: Option<u64>,
    eval_count: Option<u64>,
}

#[derive(Deserialize)]
struct OllamaMessage {
    content: Option<String>,
}

/// Structured-but-optional decode of an `/api/tags` response
#[derive(Deserialize)]
struct OllamaTagsResponse {
    models: Option<Vec<OllamaTag>>,
}

#[derive(Deserialize)]
struct OllamaTag {
    name: String,
    details: Option<OllamaTagDetails>,
}

#[derive(Deserialize)]
struct OllamaTagDetails {
    parameter_size: Option<String>,
}

impl OllamaClient {
    /// Create a new client with the given configuration
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
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
impl LlmClient for OllamaClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion> {
        let url = format!("{}/api/chat", self.config.base_url);
        debug!(%url, model = %request.model, "sending chat request");

        let body = OllamaChatBody {
            request: &request,
            stream: false,
        };
        let response = self.client.post(&url).json(&body).send().await?;
        let raw = Self::read_payload(response).await?;

        let decoded: OllamaChatResponse =
            serde_json::from_value(raw.clone()).map_err(|_| Error::malformed(raw.clone()))?;
        let text = decoded
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| Error::malformed(raw.clone()))?;
        let usage = match (decoded.prompt_eval_count, decoded.eval_count) {
            (Some(prompt), Some(completion)) => Some(TokenUsage::new(prompt, completion)),
            _ => None,
        };

        Ok(ChatCompletion { text, usage, raw })
    }

    async fn list_models(&self) -> Result<ModelList> {
        let url = format!("{}/api/tags", self.config.base_url);
        debug!(%url, "listing models");

        let response = self.client.get(&url).send().await?;
        let raw = Self::read_payload(response).await?;

        let decoded: OllamaTagsResponse =
            serde_json::from_value(raw.clone()).map_err(|_| Error::malformed(raw.clone()))?;
        let models = decoded
            .models
            .ok_or_else(|| Error::malformed(raw.clone()))?
            .into_iter()
            .map(|tag| ModelEntry {
                id: tag.name,
                parameter_size: tag.details.and_then(|d| d.parameter_size),
            })
            .collect();

        Ok(ModelList { models, raw })
    }

    fn client_type(&self) -> &str {
        "ollama"
    }

    fn endpoint(&self) -> &str {
        &self.config.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server) -> OllamaClient {
        OllamaClient::new(OllamaConfig::new(server.url(), "llama3")).unwrap()
    }

    #[tokio::test]
    async fn complete_parses_text_and_eval_counts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"message":{"role":"assistant","content":"Hi there"},
                    "prompt_eval_count":5,"eval_count":7,"done":true}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let completion = client
            .complete(ChatRequest::from_prompt("llama3", "Hello"))
            .await
            .unwrap();
        mock.assert_async().await;

        assert_eq!(completion.text, "Hi there");
        let usage = completion.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 5);
        assert_eq!(usage.completion_tokens, 7);
        assert_eq!(usage.total_tokens, 12);
    }

    #[tokio::test]
    async fn complete_sends_non_streaming_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "model": "llama3",
                "messages": [{"role": "user", "content": "Hello"}],
                "stream": false
            })))
            .with_status(200)
            .with_body(r#"{"message":{"content":"ok"}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        client
            .complete(ChatRequest::from_prompt("llama3", "Hello"))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn complete_without_message_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(r#"{"done":true}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .complete(ChatRequest::from_prompt("llama3", "Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn list_models_maps_tags() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_body(
                r#"{"models":[
                    {"name":"llama3:latest","details":{"parameter_size":"8B"}},
                    {"name":"tiny","details":{}}
                ]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let list = client.list_models().await.unwrap();
        assert_eq!(list.models.len(), 2);
        assert_eq!(list.models[0].id, "llama3:latest");
        assert_eq!(list.models[0].parameter_size.as_deref(), Some("8B"));
        assert_eq!(list.models[1].parameter_size, None);
    }

    #[tokio::test]
    async fn server_error_surfaces_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body("model not loaded")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .complete(ChatRequest::from_prompt("llama3", "Hello"))
            .await
            .unwrap_err();
        match err {
            Error::Api { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "model not loaded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
