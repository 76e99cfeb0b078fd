//! Scripted LLM for tests and offline runs.
//!
//! Replies are popped from a queue in order; once the queue is empty the
//! optional fallback reply repeats, otherwise the call fails. Every request is
//! recorded so tests can check exactly what reached the model.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::{Message, ToolCall};

/// Mock LLM returning scripted replies.
///
/// **Interaction**: Implements `LlmClient`; used by `ProcessNode` and `AgentNode` in tests.
#[derive(Default)]
pub struct MockLlm {
    script: Mutex<VecDeque<LlmResponse>>,
    fallback: Option<LlmResponse>,
    echo: bool,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Replies in order, then fails with `ModelCall("mock script exhausted")`.
    pub fn scripted(replies: impl IntoIterator<Item = LlmResponse>) -> Self {
        Self {
            script: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Always answers with the same text and no tool calls.
    pub fn with_no_tool_calls(content: impl Into<String>) -> Self {
        Self {
            fallback: Some(LlmResponse::text(content)),
            ..Self::default()
        }
    }

    /// Echoes the content of the last user turn, prefixed with `echo: `.
    pub fn echo() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// First reply asks for `tool_calls`, every later one is `final_text` without tools.
    pub fn first_tools_then_text(tool_calls: Vec<ToolCall>, final_text: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::from([LlmResponse::tools("", tool_calls)])),
            fallback: Some(LlmResponse::text(final_text)),
            ..Self::default()
        }
    }

    /// Number of completion requests received so far.
    pub fn calls(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Copies of every request, oldest first.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        self.requests
            .lock()
            .map_err(|_| AgentError::ExecutionFailed("mock request log poisoned".into()))?
            .push(messages.to_vec());

        let next = self
            .script
            .lock()
            .map_err(|_| AgentError::ExecutionFailed("mock script poisoned".into()))?
            .pop_front();
        if let Some(reply) = next.or_else(|| self.fallback.clone()) {
            return Ok(reply);
        }
        if self.echo {
            let last_user = messages.iter().rev().find(|m| m.is_user());
            return Ok(LlmResponse::text(format!(
                "echo: {}",
                last_user.map(Message::content).unwrap_or_default()
            )));
        }
        Err(AgentError::ModelCall("mock script exhausted".into()))
    }
}
