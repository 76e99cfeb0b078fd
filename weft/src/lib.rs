//! # Weft
//!
//! Small conversational agents on a graph, with a **state-in, state-out** design:
//! one [`ConversationState`] flows through every node, and each node returns the
//! updated state plus what to run next.
//!
//! ## Agents
//!
//! - **chat**: `START → process → END`, whole history sent each turn.
//! - **memory**: same graph; the transcript is written to `logging.txt` on exit.
//! - **react**: `agent ⇄ tools` with `add`, `subtract`, `multiply` until the model
//!   answers in plain text.
//! - **drafter**: `agent ⇄ tools` with `update` and `save`; a `save` result
//!   containing "saved" ends the session.
//!
//! ## Main modules
//!
//! - [`state`]: [`ConversationState`], [`Phase`], [`Document`] and the phase
//!   transitions ([`after_model`], [`after_dispatch`]).
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Next`].
//! - [`llm`]: [`LlmClient`] trait, [`MockLlm`], [`ChatOpenAI`] (OpenAI-compatible,
//!   Gemini by default), [`ModelSettings`].
//! - [`tools`]: [`Tool`] trait, [`ToolRegistry`] and the built-in tools.
//! - [`tool_source`]: [`ToolSpec`], [`ToolCallContent`], [`ToolCallContext`], [`ToolSourceError`].
//! - [`agent`]: [`AgentKind`], [`ProcessNode`], [`AgentNode`], [`ToolsNode`], [`build_graph`].
//! - [`session`]: [`Session`], the per-run driver used by the CLI.
//! - [`transcript`]: transcript rendering and saving.
//! - [`message`]: [`Message`] (System / User / Assistant / Tool), [`ToolCall`].

pub mod agent;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod session;
pub mod state;
pub mod tool_source;
pub mod tools;
pub mod transcript;

pub use agent::{build_graph, AgentKind, AgentNode, ProcessNode, ToolsNode};
pub use error::AgentError;
pub use graph::{CompilationError, CompiledStateGraph, Next, Node, StateGraph, END, START};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm, ModelSettings};
pub use message::{Message, ToolCall};
pub use session::{Session, SessionError};
pub use state::{after_dispatch, after_model, ConversationState, Document, LoopPolicy, Phase};
pub use tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
pub use tools::{Tool, ToolRegistry};
