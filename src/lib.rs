//! # llm-chat
//!
//! Command-line chat clients for locally or remotely hosted LLM serving
//! endpoints.
//!
//! Two binaries share this library:
//!
//! - `ollama-chat` sends one prompt to an Ollama-compatible endpoint and
//!   exports OpenTelemetry spans for the call over OTLP/gRPC.
//! - `owui-chat` sends one prompt to an OpenWebUI-compatible gateway with
//!   bearer authentication and reports an approximate tokens-per-second
//!   throughput, or lists the models the gateway serves.
//!
//! Each run is a single linear pipeline: resolve configuration, build one
//! chat request, await one response, render it. No retries, no streaming,
//! no state across invocations.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chat;
pub mod config;
pub mod error;
pub mod gateway;
pub mod llm_client;
pub mod ollama;
pub mod render;
pub mod telemetry;

// Re-exports for convenience
pub use chat::{ChatCompletion, ChatRequest, Message, ModelEntry, ModelList, Role, TokenUsage};
pub use config::{GatewayConfig, OllamaConfig};
pub use error::{Error, Result};
pub use gateway::GatewayClient;
pub use llm_client::LlmClient;
pub use ollama::OllamaClient;
pub use telemetry::Telemetry;
