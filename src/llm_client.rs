//! Unified client trait over the Ollama and OpenWebUI backends

use crate::chat::{ChatCompletion, ChatRequest, ModelList};
use crate::error::Result;
use async_trait::async_trait;

/// Unified trait for chat-serving backends.
///
/// Both operations are single request/response exchanges: no retries, no
/// streaming, at most one response per call.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one chat request and await the complete response
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion>;

    /// List the models the endpoint serves
    async fn list_models(&self) -> Result<ModelList>;

    /// Get the client type for logging and span naming
    fn client_type(&self) -> &str;

    /// Get the base URL this client talks to
    fn endpoint(&self) -> &str;
}
