//! Tool specs, call results, call context and tool errors.
//!
//! Shared by the tool registry (execution), `ChatOpenAI` (tool specs sent to the
//! model) and the tools node (dispatch).

use serde_json::Value;
use thiserror::Error;

use crate::state::Document;

/// Tool specification: name, description for the model, JSON Schema of the arguments.
///
/// **Interaction**: Returned by `Tool::spec()` / `ToolRegistry::list()`; sent to the
/// model by `ChatOpenAI::with_tools`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    /// JSON Schema for arguments.
    pub input_schema: Value,
}

/// Result text of a single tool call; becomes a tool-result turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallContent {
    pub text: String,
}

impl ToolCallContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Per-call access to session-owned state.
///
/// The tools node builds one from the conversation state before each call, so
/// document tools mutate the session's document rather than any global.
pub struct ToolCallContext<'a> {
    pub document: &'a mut Document,
}

impl<'a> ToolCallContext<'a> {
    pub fn new(document: &'a mut Document) -> Self {
        Self { document }
    }
}

/// Errors from calling tools.
///
/// **Interaction**: Returned by `Tool::call()` and `ToolRegistry::call()`; the
/// tools node turns them into tool-result text so the model can correct itself.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
}
