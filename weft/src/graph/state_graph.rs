//! State graph builder: nodes + explicit edges (from → to) and conditional edges.
//!
//! Add nodes with `add_node`, wire them with `add_edge(from, to)` using `START`
//! and `END` for entry and exit, and use `add_conditional_edges` to pick the next
//! node from state. A node has either one outgoing `add_edge` or conditional
//! edges, never both. `compile` validates and freezes the graph.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use super::compile_error::CompilationError;
use super::compiled::{CompiledStateGraph, DEFAULT_RECURSION_LIMIT};
use super::conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
use super::node::Node;

/// Sentinel for graph entry: use as `from_id` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to_id` in `add_edge(last_node_id, END)`.
pub const END: &str = "__end__";

/// Mutable graph description, generic over the state type `S`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    edges: Vec<(String, String)>,
    conditional_edges: HashMap<String, ConditionalRouter<S>>,
    recursion_limit: usize,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            conditional_edges: HashMap::new(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Maximum node executions per `invoke` before it fails with `AgentError::RecursionLimit`.
    pub fn with_recursion_limit(self, recursion_limit: usize) -> Self {
        Self {
            recursion_limit,
            ..self
        }
    }

    /// Adds a node; replaces any node registered under the same id.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds an edge from `from_id` to `to_id` (`START` / `END` allowed).
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// After `source` runs, `path(state)` picks the next node.
    ///
    /// Without a `path_map` the returned key is the next node id (or `END`); with a
    /// map the key is looked up first and falls back to itself.
    ///
    /// ```rust,ignore
    /// graph.add_conditional_edges(
    ///     "agent",
    ///     Arc::new(|s: &ConversationState| match s.phase() {
    ///         Phase::AwaitingToolDispatch => "tools".into(),
    ///         _ => END.into(),
    ///     }),
    ///     None,
    /// );
    /// ```
    pub fn add_conditional_edges(
        &mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
        path_map: Option<HashMap<String, String>>,
    ) -> &mut Self {
        self.conditional_edges
            .insert(source.into(), ConditionalRouter::new(path, path_map));
        self
    }

    /// Validates ids and wiring and returns the executable graph.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        for (from, to) in &self.edges {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !self.nodes.contains_key(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }
        for (source, router) in &self.conditional_edges {
            if !self.nodes.contains_key(source) {
                return Err(CompilationError::NodeNotFound(source.clone()));
            }
            if let Some(path_map) = &router.path_map {
                if let Some(target) = path_map
                    .values()
                    .find(|t| t.as_str() != END && !self.nodes.contains_key(t.as_str()))
                {
                    return Err(CompilationError::InvalidConditionalPathMap(target.clone()));
                }
            }
        }

        let mut starts = self.edges.iter().filter(|(f, _)| f == START);
        let first = match (starts.next(), starts.next()) {
            (Some((_, to)), None) => to.clone(),
            _ => return Err(CompilationError::MissingStart),
        };

        let reaches_end = self.edges.iter().any(|(_, t)| t == END)
            || self.conditional_edges.values().any(|r| {
                r.path_map
                    .as_ref()
                    .map_or(true, |m| m.values().any(|v| v == END))
            });
        if !reaches_end {
            return Err(CompilationError::MissingEnd);
        }

        let mut next_map: HashMap<String, NextEntry<S>> = HashMap::new();
        let mut seen = HashSet::new();
        for (from, to) in self.edges.iter().filter(|(f, _)| f != START) {
            if !seen.insert(from.clone()) {
                return Err(CompilationError::Branch(from.clone()));
            }
            if self.conditional_edges.contains_key(from) {
                return Err(CompilationError::NodeHasBothEdgeAndConditional(from.clone()));
            }
            next_map.insert(from.clone(), NextEntry::Unconditional(to.clone()));
        }
        for (source, router) in self.conditional_edges {
            next_map.insert(source, NextEntry::Conditional(router));
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            first_node_id: first,
            next_map,
            recursion_limit: self.recursion_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::error::AgentError;
    use crate::graph::Next;

    #[derive(Clone)]
    struct Pass(&'static str);

    #[async_trait]
    impl Node<u32> for Pass {
        fn id(&self) -> &str {
            self.0
        }
        async fn run(&self, state: u32) -> Result<(u32, Next), AgentError> {
            Ok((state, Next::Continue))
        }
    }

    fn two_nodes() -> StateGraph<u32> {
        let mut graph = StateGraph::<u32>::new();
        graph
            .add_node("a", Arc::new(Pass("a")))
            .add_node("b", Arc::new(Pass("b")));
        graph
    }

    #[test]
    fn compile_linear_ok() {
        let mut graph = two_nodes();
        graph.add_edge(START, "a").add_edge("a", "b").add_edge("b", END);
        assert!(graph.compile().is_ok());
    }

    #[test]
    fn compile_fails_on_unknown_node() {
        let mut graph = two_nodes();
        graph.add_edge(START, "a").add_edge("a", "missing").add_edge("b", END);
        assert!(matches!(
            graph.compile(),
            Err(CompilationError::NodeNotFound(id)) if id == "missing"
        ));
    }

    #[test]
    fn compile_fails_without_start() {
        let mut graph = two_nodes();
        graph.add_edge("a", "b").add_edge("b", END);
        assert!(matches!(graph.compile(), Err(CompilationError::MissingStart)));
    }

    #[test]
    fn compile_fails_with_two_starts() {
        let mut graph = two_nodes();
        graph.add_edge(START, "a").add_edge(START, "b").add_edge("b", END);
        assert!(matches!(graph.compile(), Err(CompilationError::MissingStart)));
    }

    #[test]
    fn compile_fails_without_end() {
        let mut graph = two_nodes();
        graph.add_edge(START, "a").add_edge("a", "b");
        assert!(matches!(graph.compile(), Err(CompilationError::MissingEnd)));
    }

    #[test]
    fn compile_fails_on_branch() {
        let mut graph = two_nodes();
        graph.add_edge(START, "a").add_edge("a", "b").add_edge("a", END);
        assert!(matches!(graph.compile(), Err(CompilationError::Branch(id)) if id == "a"));
    }

    /// **Scenario**: a node with both an edge and conditional edges is rejected.
    #[test]
    fn compile_fails_when_node_has_both_edge_and_conditional() {
        let mut graph = two_nodes();
        graph.add_edge(START, "a").add_edge("a", "b").add_edge("b", END);
        graph.add_conditional_edges("a", Arc::new(|_: &u32| END.to_string()), None);
        assert!(matches!(
            graph.compile(),
            Err(CompilationError::NodeHasBothEdgeAndConditional(id)) if id == "a"
        ));
    }

    #[test]
    fn compile_fails_on_bad_path_map_target() {
        let mut graph = two_nodes();
        graph.add_edge(START, "a").add_edge("b", END);
        graph.add_conditional_edges(
            "a",
            Arc::new(|_: &u32| "go".to_string()),
            Some(HashMap::from([("go".to_string(), "nowhere".to_string())])),
        );
        assert!(matches!(
            graph.compile(),
            Err(CompilationError::InvalidConditionalPathMap(t)) if t == "nowhere"
        ));
    }
}
