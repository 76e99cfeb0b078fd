//! LLM client abstraction used by the process and agent nodes.
//!
//! `LlmClient::invoke` takes the full request (optional instruction turn plus
//! conversation) and returns one assistant reply with optional tool calls.
//! Implementations: [`ChatOpenAI`] (OpenAI-compatible endpoint, Gemini by
//! default) and [`MockLlm`] (scripted, for tests).

mod mock;
mod openai;
mod settings;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;
pub use settings::{
    ModelSettings, API_BASE_ENV, API_KEY_ENV, DEFAULT_API_BASE, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, MODEL_ENV,
};

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::{Message, ToolCall};

/// Token usage for one completion, when the provider reports it.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One completion: assistant text and requested tool calls (empty when none).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LlmResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub usage: Option<LlmUsage>,
}

impl LlmResponse {
    /// Plain text reply without tool calls.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Reply that asks for the given tool calls.
    pub fn tools(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: content.into(),
            tool_calls,
            usage: None,
        }
    }
}

/// Completion call: messages in, one assistant reply out.
///
/// Failures are returned as `AgentError::ModelCall` and are never retried.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}
