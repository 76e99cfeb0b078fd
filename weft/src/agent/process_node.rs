//! Process node: the single step of the linear chat and memory graphs.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{after_model, ConversationState, LoopPolicy};

/// Sends the whole conversation to the model and appends the reply.
///
/// No instruction prefix and no tools; the phase goes straight back to
/// `AwaitingUser`.
///
/// **Interaction**: Implements `Node<ConversationState>`; the only node of
/// `START → process → END`.
pub struct ProcessNode {
    llm: Arc<dyn LlmClient>,
}

impl ProcessNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<ConversationState> for ProcessNode {
    fn id(&self) -> &str {
        "process"
    }

    async fn run(
        &self,
        mut state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let response = self.llm.invoke(state.messages()).await?;
        state.push(Message::assistant(response.content));
        let phase = after_model(LoopPolicy::Linear, &state);
        state.set_phase(phase);
        debug!(
            turns = ?state.messages().iter().map(Message::content).collect::<Vec<_>>(),
            "current state"
        );
        Ok((state, Next::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;
    use crate::state::Phase;

    /// **Scenario**: one run appends exactly one assistant turn and returns to AwaitingUser.
    #[tokio::test]
    async fn appends_reply_and_awaits_user() {
        let llm = Arc::new(MockLlm::echo());
        let node = ProcessNode::new(llm.clone());
        let mut state = ConversationState::new();
        state.submit_user("hi");
        let (state, next) = node.run(state).await.unwrap();
        assert_eq!(next, Next::Continue);
        assert_eq!(state.messages().len(), 2);
        assert_eq!(state.last_assistant_reply(), Some("echo: hi"));
        assert_eq!(state.phase(), Phase::AwaitingUser);
        assert_eq!(llm.requests()[0], vec![Message::user("hi")]);
    }
}
