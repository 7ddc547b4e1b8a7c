//! Model provider abstraction.
//!
//! The agent is generic over anything that can turn a conversation plus a
//! tool list into an assistant message. [`OpenAiProvider`] is the shipped
//! implementation; tests use in-crate mocks.

mod openai;

pub use openai::OpenAiProvider;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Message, StopReason, ToolDefinition};

/// One model response: the assistant message and why generation stopped
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub message: Message,
    pub stop_reason: StopReason,
}

/// Errors from a model provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("model error: {0}")]
    Model(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("{0}")]
    Other(String),
}

/// A chat-completions backend the agent can drive
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name for diagnostics
    fn name(&self) -> &str;

    /// Generate the next assistant message
    async fn generate(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        system_prompt: Option<&str>,
    ) -> Result<ModelResponse, ProviderError>;
}
