//! The four agents and the graphs they run.
//!
//! - `chat`, `memory`: `START → process → END`.
//! - `react`, `drafter`: `START → agent`, `agent → tools | END`, `tools → agent | END`.
//!   Routers read the phase the nodes wrote and return a routing key
//!   ([`ROUTE_TOOLS`], [`ROUTE_MODEL`] or `END`) that a path map resolves to a node:
//!   `AwaitingToolDispatch` goes to `tools`, `AwaitingModel` goes back to `agent`,
//!   anything else ends the run and hands control back to the session.

mod agent_node;
mod process_node;
mod prompt;
mod tools_node;

pub use agent_node::{AgentNode, InstructionsFn};
pub use process_node::ProcessNode;
pub use prompt::{drafter_prompt, DRAFTER_OPENING, REACT_DEMO_MESSAGE, REACT_SYSTEM_PROMPT};
pub use tools_node::{ToolsNode, TOOL_ERROR_TEMPLATE};

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::state::{ConversationState, LoopPolicy, Phase};
use crate::tools::{calculator_tools, document_tools, ToolRegistry};

/// Which agent a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Chat,
    Memory,
    React,
    Drafter,
}

impl AgentKind {
    pub const ALL: [AgentKind; 4] = [Self::Chat, Self::Memory, Self::React, Self::Drafter];

    pub fn name(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Memory => "memory",
            Self::React => "react",
            Self::Drafter => "drafter",
        }
    }

    pub fn policy(self) -> LoopPolicy {
        match self {
            Self::Chat | Self::Memory => LoopPolicy::Linear,
            Self::React => LoopPolicy::UntilReply,
            Self::Drafter => LoopPolicy::UntilSaved,
        }
    }

    /// Printed when the session starts.
    pub fn banner(self) -> &'static str {
        match self {
            Self::Chat => "=== SIMPLE CHAT AGENT ===",
            Self::Memory => "=== MEMORY AGENT ===",
            Self::React => "=== REACT AGENT ===",
            Self::Drafter => "=== DRAFTER AGENT ===",
        }
    }

    /// Printed when the session ends, for agents that have one.
    pub fn closing_banner(self) -> Option<&'static str> {
        match self {
            Self::Drafter => Some("=== DRAFTER FINISHED ==="),
            _ => None,
        }
    }

    /// Input prompt shown before each user turn.
    pub fn input_prompt(self) -> &'static str {
        match self {
            Self::Drafter => "What would you like to do with the document? ",
            _ => "Enter: ",
        }
    }

    /// Tools the agent exposes. `save_dir` only matters for the drafter.
    pub fn tools(self, save_dir: Option<PathBuf>) -> ToolRegistry {
        match self {
            Self::Chat | Self::Memory => ToolRegistry::new(),
            Self::React => calculator_tools(),
            Self::Drafter => document_tools(save_dir),
        }
    }

    /// Instruction prefix sent with every model call; chat and memory send none.
    pub fn instructions(self) -> Option<InstructionsFn> {
        match self {
            Self::Chat | Self::Memory => None,
            Self::React => Some(Arc::new(|_: &ConversationState| REACT_SYSTEM_PROMPT.to_string())),
            Self::Drafter => Some(Arc::new(|s: &ConversationState| {
                drafter_prompt(s.document().as_str())
            })),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown agent '{}' (expected chat, memory, react or drafter)", s)
            })
    }
}

/// Builds and compiles the graph for `kind`.
///
/// `llm` should already have the registry's specs bound when the agent uses
/// tools (see `ChatOpenAI::with_tools`).
/// Routing key for "dispatch the pending tool calls".
pub const ROUTE_TOOLS: &str = "tools";
/// Routing key for "call the model again".
pub const ROUTE_MODEL: &str = "model";

/// Key after a model step: tools when calls are pending, otherwise end the run.
pub fn route_after_model(state: &ConversationState) -> &'static str {
    match state.phase() {
        Phase::AwaitingToolDispatch => ROUTE_TOOLS,
        _ => END,
    }
}

/// Key after a dispatch step: back to the model unless the session terminated.
pub fn route_after_dispatch(state: &ConversationState) -> &'static str {
    match state.phase() {
        Phase::AwaitingModel => ROUTE_MODEL,
        _ => END,
    }
}

fn path_map(key: &str, node: &str) -> HashMap<String, String> {
    [(key.to_string(), node.to_string()), (END.to_string(), END.to_string())]
        .into_iter()
        .collect()
}

pub fn build_graph(
    kind: AgentKind,
    llm: Arc<dyn LlmClient>,
    registry: Arc<ToolRegistry>,
) -> Result<CompiledStateGraph<ConversationState>, CompilationError> {
    let mut graph = StateGraph::<ConversationState>::new();
    match kind.policy() {
        LoopPolicy::Linear => {
            graph
                .add_node("process", Arc::new(ProcessNode::new(llm)))
                .add_edge(START, "process")
                .add_edge("process", END);
        }
        policy @ (LoopPolicy::UntilReply | LoopPolicy::UntilSaved) => {
            let mut agent = AgentNode::new(llm, policy);
            if let Some(instructions) = kind.instructions() {
                agent = agent.with_instructions(instructions);
            }
            graph
                .add_node("agent", Arc::new(agent))
                .add_node("tools", Arc::new(ToolsNode::new(registry, policy)))
                .add_edge(START, "agent")
                .add_conditional_edges(
                    "agent",
                    Arc::new(|s: &ConversationState| route_after_model(s).to_string()),
                    Some(path_map(ROUTE_TOOLS, "tools")),
                )
                .add_conditional_edges(
                    "tools",
                    Arc::new(|s: &ConversationState| route_after_dispatch(s).to_string()),
                    Some(path_map(ROUTE_MODEL, "agent")),
                );
        }
    }
    graph.compile()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlm;

    /// **Scenario**: routers map each phase to its routing key.
    #[test]
    fn routes_follow_phase() {
        let mut state = ConversationState::new();
        state.set_phase(Phase::AwaitingToolDispatch);
        assert_eq!(route_after_model(&state), ROUTE_TOOLS);
        assert_eq!(route_after_dispatch(&state), END);
        state.set_phase(Phase::AwaitingModel);
        assert_eq!(route_after_model(&state), END);
        assert_eq!(route_after_dispatch(&state), ROUTE_MODEL);
        state.set_phase(Phase::Terminated);
        assert_eq!(route_after_model(&state), END);
        assert_eq!(route_after_dispatch(&state), END);
    }

    #[test]
    fn parse_agent_kind() {
        assert_eq!("React".parse::<AgentKind>().unwrap(), AgentKind::React);
        assert_eq!(" drafter ".parse::<AgentKind>().unwrap(), AgentKind::Drafter);
        assert!("planner".parse::<AgentKind>().is_err());
    }

    #[test]
    fn tools_per_agent() {
        let names = |k: AgentKind| -> Vec<String> {
            k.tools(None).list().into_iter().map(|s| s.name).collect()
        };
        assert!(names(AgentKind::Chat).is_empty());
        assert!(names(AgentKind::Memory).is_empty());
        assert_eq!(names(AgentKind::React), ["add", "subtract", "multiply"]);
        assert_eq!(names(AgentKind::Drafter), ["update", "save"]);
    }

    /// **Scenario**: every agent's graph compiles.
    #[test]
    fn all_graphs_compile() {
        for kind in AgentKind::ALL {
            let llm: Arc<dyn LlmClient> = Arc::new(MockLlm::echo());
            let registry = Arc::new(kind.tools(None));
            assert!(build_graph(kind, llm, registry).is_ok(), "{}", kind);
        }
    }
}
