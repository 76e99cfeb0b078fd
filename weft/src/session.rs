//! Session driver: owns the conversation state between user turns.
//!
//! Each `submit` appends one user turn and runs the agent's graph until it
//! hands control back (phase `AwaitingUser`) or the session ends
//! (`Terminated`). The exit keyword ends the session without a model call.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::agent::{build_graph, AgentKind, DRAFTER_OPENING};
use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::{is_exit_keyword, ConversationState};
use crate::tools::ToolRegistry;

/// Errors from driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error("graph compilation failed: {0}")]
    Compile(#[from] CompilationError),
    #[error("session already terminated")]
    Terminated,
}

/// One interactive run of an agent.
pub struct Session {
    kind: AgentKind,
    graph: CompiledStateGraph<ConversationState>,
    state: ConversationState,
}

impl Session {
    /// `llm` must already carry the specs of `tools` when the agent uses tools.
    pub fn new(
        kind: AgentKind,
        llm: Arc<dyn LlmClient>,
        tools: ToolRegistry,
    ) -> Result<Self, SessionError> {
        let graph = build_graph(kind, llm, Arc::new(tools))?;
        Ok(Self {
            kind,
            graph,
            state: ConversationState::new(),
        })
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn messages(&self) -> &[Message] {
        self.state.messages()
    }

    pub fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }

    /// Runs the agent's opening turn, if it has one, and returns the new turns.
    ///
    /// Only the drafter opens: it sends a canned user turn before any input is read.
    pub async fn open(&mut self) -> Result<Vec<Message>, SessionError> {
        match self.kind {
            AgentKind::Drafter if self.state.messages().is_empty() => {
                self.run_turn(DRAFTER_OPENING).await
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Handles one line of user input and returns the turns it produced
    /// (the user turn first).
    ///
    /// The exit keyword terminates the session and returns no turns.
    pub async fn submit(&mut self, input: &str) -> Result<Vec<Message>, SessionError> {
        if self.state.is_terminated() {
            return Err(SessionError::Terminated);
        }
        if is_exit_keyword(input) {
            info!(agent = %self.kind, "exit keyword received");
            self.state.terminate();
            return Ok(Vec::new());
        }
        self.run_turn(input).await
    }

    async fn run_turn(&mut self, input: &str) -> Result<Vec<Message>, SessionError> {
        let before = self.state.messages().len();
        let mut state = self.state.clone();
        state.submit_user(input);
        let state = self.graph.invoke(state).await?;
        debug!(
            agent = %self.kind,
            phase = ?state.phase(),
            turns = state.messages().len(),
            "turn complete"
        );
        self.state = state;
        Ok(self.state.messages()[before..].to_vec())
    }

    /// Ends the session and hands back the final state.
    pub fn finish(mut self) -> ConversationState {
        self.state.terminate();
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmResponse, MockLlm};

    /// **Scenario**: a failed model call leaves the state at the last completed turn.
    #[tokio::test]
    async fn failed_turn_keeps_previous_state() {
        let llm = Arc::new(MockLlm::scripted([LlmResponse::text("one")]));
        let mut session = Session::new(AgentKind::Chat, llm, ToolRegistry::new()).unwrap();
        session.submit("a").await.unwrap();
        let err = session.submit("b").await.unwrap_err();
        assert!(matches!(err, SessionError::Agent(AgentError::ModelCall(_))));
        assert_eq!(session.messages().len(), 2);
    }

    /// **Scenario**: submit after termination is an error.
    #[tokio::test]
    async fn submit_after_exit_fails() {
        let llm = Arc::new(MockLlm::echo());
        let mut session = Session::new(AgentKind::Chat, llm, ToolRegistry::new()).unwrap();
        assert!(session.submit(" EXIT ").await.unwrap().is_empty());
        assert!(session.is_terminated());
        assert!(matches!(
            session.submit("hi").await,
            Err(SessionError::Terminated)
        ));
    }

    #[tokio::test]
    async fn open_is_noop_for_chat() {
        let llm = Arc::new(MockLlm::echo());
        let mut session = Session::new(AgentKind::Chat, llm.clone(), ToolRegistry::new()).unwrap();
        assert!(session.open().await.unwrap().is_empty());
        assert_eq!(llm.calls(), 0);
    }
}
