//! Conversation state that flows through every graph node.
//!
//! `ConversationState` owns the append-only turn list, the explicit [`Phase`] of
//! the conversation state machine, and the drafter's [`Document`]. Nodes take it
//! by value and hand it back (state-in, state-out), so there is exactly one owner
//! at any time and no locking.

mod transition;

use serde::{Deserialize, Serialize};

use crate::message::{Message, ToolCall};

pub use transition::{
    after_dispatch, after_model, completion_reached, is_completion_marker, is_exit_keyword,
    LoopPolicy, COMPLETION_MARKER, EXIT_KEYWORD,
};

/// Where the conversation state machine currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a new user turn (initial).
    #[default]
    AwaitingUser,
    /// A user or tool-result turn was appended; a completion request is due.
    AwaitingModel,
    /// The last assistant turn requested tools that have not run yet.
    AwaitingToolDispatch,
    /// No further turns will be processed.
    Terminated,
}

/// The drafter's working text. Replaced wholesale; no history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document(String);

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn replace(&mut self, content: impl Into<String>) {
        self.0 = content.into();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// State for every weft graph.
///
/// Turns can only be appended (`push`, `submit_user`); there is no API to remove
/// or reorder them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationState {
    messages: Vec<Message>,
    phase: Phase,
    #[serde(default)]
    document: Document,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// All turns, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    pub fn terminate(&mut self) {
        self.phase = Phase::Terminated;
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Appends a turn at the tail.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Appends a user turn and moves to `AwaitingModel` (AwaitingUser → AwaitingModel).
    pub fn submit_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
        self.phase = Phase::AwaitingModel;
    }

    /// Tool calls of the most recent turn when that turn is an assistant turn.
    pub fn pending_tool_calls(&self) -> &[ToolCall] {
        match self.messages.last() {
            Some(m @ Message::Assistant { .. }) => m.tool_calls(),
            _ => &[],
        }
    }

    /// Content of the most recent tool-result turn anywhere in history.
    pub fn latest_tool_result(&self) -> Option<(&str, &str)> {
        self.messages
            .iter()
            .rev()
            .find_map(|m| m.tool_name().map(|name| (name, m.content())))
    }

    /// Content of the most recent assistant turn (empty string for a tools-only turn).
    pub fn last_assistant_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_assistant())
            .map(Message::content)
    }

    pub fn user_turns(&self) -> usize {
        self.messages.iter().filter(|m| m.is_user()).count()
    }

    pub fn assistant_turns(&self) -> usize {
        self.messages.iter().filter(|m| m.is_assistant()).count()
    }
}
