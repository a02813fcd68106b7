//! Request and response types shared across backends

use serde::{Deserialize, Serialize};

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// Message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

}

/// Outbound chat request. Exactly one is sent per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<Message>,
}

impl ChatRequest {
    /// Create a new chat request
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }

    /// Build a request carrying the prompt verbatim as a single user message
    pub fn from_prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(model, vec![Message::user(prompt)])
    }

    /// Content of the first user message, if any
    pub fn prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Token usage information reported by a backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    pub prompt_tokens: u64,
    /// Completion tokens
    pub completion_tokens: u64,
    /// Total tokens (prompt + completion)
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Create a new token usage record
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Completed chat exchange, unified across backends
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    /// Generated text from the first choice
    pub text: String,
    /// Token usage, when the backend reports it
    pub usage: Option<TokenUsage>,
    /// The raw response payload, kept for debug output
    pub raw: serde_json::Value,
}

/// One entry from a model listing
#[derive(Debug, Clone)]
pub struct ModelEntry {
    /// Model identifier
    pub id: String,
    /// Human-readable parameter size (e.g., "7B"), when reported
    pub parameter_size: Option<String>,
}

/// Result of a model-listing call
#[derive(Debug, Clone)]
pub struct ModelList {
    /// Models reported by the endpoint
    pub models: Vec<ModelEntry>,
    /// The raw response payload, kept for debug output
    pub raw: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prompt_request_serializes_to_wire_shape() {
        let request = ChatRequest::from_prompt("llama3", "Hello");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "llama3",
                "messages": [{"role": "user", "content": "Hello"}]
            })
        );
    }

    #[test]
    fn prompt_accessor_returns_first_user_message() {
        let request = ChatRequest::new(
            "llama3",
            vec![Message::system("be terse"), Message::user("Hello")],
        );
        assert_eq!(request.prompt(), Some("Hello"));
    }

    #[test]
    fn token_usage_totals() {
        let usage = TokenUsage::new(10, 32);
        assert_eq!(usage.total_tokens, 42);
    }
}
