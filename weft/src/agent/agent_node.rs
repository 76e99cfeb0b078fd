//! Agent node: one model call in an agent ⇄ tools loop.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{after_model, ConversationState, LoopPolicy};

/// Builds the instruction prefix from the current state (e.g. to embed the document).
pub type InstructionsFn = Arc<dyn Fn(&ConversationState) -> String + Send + Sync>;

/// Calls the model with `[instructions] + conversation`, appends the assistant
/// turn (with any tool calls) and sets the next phase from the loop policy.
///
/// Tool specs are bound on the client (`ChatOpenAI::with_tools`), not here.
///
/// **Interaction**: Implements `Node<ConversationState>`; routed to `tools` when
/// the phase becomes `AwaitingToolDispatch`.
pub struct AgentNode {
    llm: Arc<dyn LlmClient>,
    instructions: Option<InstructionsFn>,
    policy: LoopPolicy,
}

impl AgentNode {
    pub fn new(llm: Arc<dyn LlmClient>, policy: LoopPolicy) -> Self {
        Self {
            llm,
            instructions: None,
            policy,
        }
    }

    pub fn with_instructions(mut self, instructions: InstructionsFn) -> Self {
        self.instructions = Some(instructions);
        self
    }

    fn request(&self, state: &ConversationState) -> Vec<Message> {
        let mut request = Vec::with_capacity(state.messages().len() + 1);
        if let Some(instructions) = &self.instructions {
            request.push(Message::system(instructions(state)));
        }
        request.extend_from_slice(state.messages());
        request
    }
}

#[async_trait]
impl Node<ConversationState> for AgentNode {
    fn id(&self) -> &str {
        "agent"
    }

    async fn run(
        &self,
        mut state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let response = self.llm.invoke(&self.request(&state)).await?;
        debug!(
            tool_calls = ?response.tool_calls.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            "agent reply"
        );
        state.push(Message::assistant_with_tools(
            response.content,
            response.tool_calls,
        ));
        let phase = after_model(self.policy, &state);
        state.set_phase(phase);
        Ok((state, Next::Continue))
    }
}
