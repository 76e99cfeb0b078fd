use async_trait::async_trait;
use serde_json::Value;

use crate::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};

/// A single tool the model can call.
///
/// Each tool has a unique name, a specification (description and JSON schema),
/// and implements the call logic. Tools hold no state of their own; anything
/// session-scoped (the drafter document) arrives through `ctx`.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use weft::tools::Tool;
/// use weft::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
///
/// struct Ping;
///
/// #[async_trait]
/// impl Tool for Ping {
///     fn name(&self) -> &str {
///         "ping"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec {
///             name: "ping".to_string(),
///             description: Some("Answers pong".to_string()),
///             input_schema: serde_json::json!({"type": "object"}),
///         }
///     }
///
///     async fn call(
///         &self,
///         _args: Value,
///         _ctx: &mut ToolCallContext<'_>,
///     ) -> Result<ToolCallContent, ToolSourceError> {
///         Ok(ToolCallContent::text("pong"))
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name within a `ToolRegistry`; the model calls the tool by it.
    fn name(&self) -> &str;

    /// Name, description for the model, and JSON schema for arguments.
    fn spec(&self) -> ToolSpec;

    /// Runs the tool. Argument problems are `ToolSourceError::InvalidInput`.
    async fn call(
        &self,
        args: Value,
        ctx: &mut ToolCallContext<'_>,
    ) -> Result<ToolCallContent, ToolSourceError>;
}
