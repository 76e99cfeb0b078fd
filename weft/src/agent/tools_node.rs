//! Tools node: run every pending tool call in order and append the results.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::message::Message;
use crate::state::{after_dispatch, ConversationState, LoopPolicy};
use crate::tool_source::ToolCallContext;
use crate::tools::ToolRegistry;

/// Result text for a failed call; the model sees it and can retry.
pub const TOOL_ERROR_TEMPLATE: &str = "Error: {error}\n Please fix your mistakes.";

/// Parses tool arguments; tolerates empty input and JSON encoded as a JSON string.
fn parse_tool_arguments(arguments: &str) -> Value {
    let raw = if arguments.trim().is_empty() {
        serde_json::json!({})
    } else {
        match serde_json::from_str(arguments) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, arguments = %arguments, "tool arguments JSON parse failed, using empty object");
                serde_json::json!({})
            }
        }
    };
    if let Some(s) = raw.as_str() {
        serde_json::from_str(s).unwrap_or_else(|e| {
            warn!(error = %e, "nested tool arguments JSON parse failed");
            raw
        })
    } else {
        raw
    }
}

/// Dispatches the tool calls of the last assistant turn, one at a time, in
/// request order. Each call sees the session document through
/// `ToolCallContext`. Tool errors become result text; nothing here fails the graph.
///
/// **Interaction**: Implements `Node<ConversationState>`; runs after `agent`
/// when the phase is `AwaitingToolDispatch`.
pub struct ToolsNode {
    registry: Arc<ToolRegistry>,
    policy: LoopPolicy,
}

impl ToolsNode {
    pub fn new(registry: Arc<ToolRegistry>, policy: LoopPolicy) -> Self {
        Self { registry, policy }
    }
}

#[async_trait]
impl Node<ConversationState> for ToolsNode {
    fn id(&self) -> &str {
        "tools"
    }

    async fn run(
        &self,
        mut state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let calls = state.pending_tool_calls().to_vec();
        for call in &calls {
            let args = parse_tool_arguments(&call.arguments);
            debug!(tool = %call.name, args = %args, "tool call");
            let outcome = {
                let mut ctx = ToolCallContext::new(state.document_mut());
                self.registry.call(&call.name, args, &mut ctx).await
            };
            let text = match outcome {
                Ok(content) => content.text,
                Err(e) => {
                    warn!(tool = %call.name, error = %e, "tool call failed");
                    TOOL_ERROR_TEMPLATE.replace("{error}", &e.to_string())
                }
            };
            state.push(Message::tool_result(call, text));
        }
        let phase = after_dispatch(self.policy, &state);
        state.set_phase(phase);
        Ok((state, Next::Continue))
    }
}
