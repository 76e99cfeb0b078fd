//! Compiled state graph: immutable, runs with `invoke`.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AgentError;

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_routing,
};
use super::state_graph::END;
use super::{Next, NextEntry, Node};

/// Node executions allowed per `invoke` unless overridden with `StateGraph::with_recursion_limit`.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Compiled graph: immutable structure built by `StateGraph::compile()`.
///
/// Starts at the node wired from START; after each node the conditional router
/// (when present) or the node's `Next` plus its outgoing edge decides what runs next.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) first_node_id: String,
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    pub(super) recursion_limit: usize,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn resolve_next(&self, current_id: &str, state: &S, next: Next) -> Option<String> {
        match self.next_map.get(current_id) {
            Some(NextEntry::Conditional(router)) => {
                let target = router.resolve_next(state);
                log_routing(current_id, &target);
                Some(target)
            }
            Some(NextEntry::Unconditional(to)) => match next {
                Next::End => None,
                Next::Continue => Some(to.clone()),
            },
            None => None,
        }
    }

    /// Runs the graph from its first node until END and returns the final state.
    ///
    /// Node errors propagate unchanged; nothing is retried.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        let mut current_id = self.first_node_id.clone();
        let mut state = state;
        let mut steps = 0usize;
        log_graph_start(&current_id);

        loop {
            if steps >= self.recursion_limit {
                let err = AgentError::RecursionLimit(self.recursion_limit);
                log_graph_error(&current_id, &err);
                return Err(err);
            }
            let node = self.nodes.get(&current_id).cloned().ok_or_else(|| {
                AgentError::ExecutionFailed(format!("unknown node: {}", current_id))
            })?;

            log_node_start(&current_id, &state);
            let (new_state, next) = match node.run(state).await {
                Ok(output) => output,
                Err(err) => {
                    log_graph_error(&current_id, &err);
                    return Err(err);
                }
            };
            log_node_complete(&current_id, &next);
            state = new_state;
            steps += 1;

            match self.resolve_next(&current_id, &state, next) {
                Some(id) if id != END => current_id = id,
                _ => {
                    log_graph_complete(steps);
                    return Ok(state);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::graph::{StateGraph, START};

    struct AddNode {
        id: &'static str,
        delta: i32,
        next: Next,
    }

    #[async_trait]
    impl Node<i32> for AddNode {
        fn id(&self) -> &str {
            self.id
        }
        async fn run(&self, state: i32) -> Result<(i32, Next), AgentError> {
            Ok((state + self.delta, self.next.clone()))
        }
    }

    fn add(id: &'static str, delta: i32) -> Arc<dyn Node<i32>> {
        Arc::new(AddNode {
            id,
            delta,
            next: Next::Continue,
        })
    }

    struct FailNode;

    #[async_trait]
    impl Node<i32> for FailNode {
        fn id(&self) -> &str {
            "fail"
        }
        async fn run(&self, _state: i32) -> Result<(i32, Next), AgentError> {
            Err(AgentError::ModelCall("boom".into()))
        }
    }

    #[tokio::test]
    async fn invoke_linear_chain_runs_each_node_once() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("one", add("one", 1))
            .add_node("ten", add("ten", 10))
            .add_edge(START, "one")
            .add_edge("one", "ten")
            .add_edge("ten", END);
        let out = graph.compile().unwrap().invoke(0).await.unwrap();
        assert_eq!(out, 11);
    }

    /// **Scenario**: a conditional router loops until the state crosses a threshold.
    #[tokio::test]
    async fn invoke_conditional_edges_loop_until_router_ends() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("inc", add("inc", 1))
            .add_edge(START, "inc")
            .add_conditional_edges(
                "inc",
                Arc::new(|s: &i32| if *s < 3 { "inc".into() } else { END.into() }),
                None,
            );
        let out = graph.compile().unwrap().invoke(0).await.unwrap();
        assert_eq!(out, 3);
    }

    #[tokio::test]
    async fn invoke_next_end_stops_early() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node(
                "stop",
                Arc::new(AddNode {
                    id: "stop",
                    delta: 1,
                    next: Next::End,
                }),
            )
            .add_node("never", add("never", 100))
            .add_edge(START, "stop")
            .add_edge("stop", "never")
            .add_edge("never", END);
        let out = graph.compile().unwrap().invoke(0).await.unwrap();
        assert_eq!(out, 1);
    }

    #[tokio::test]
    async fn invoke_node_error_propagates() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("fail", Arc::new(FailNode))
            .add_edge(START, "fail")
            .add_edge("fail", END);
        let err = graph.compile().unwrap().invoke(0).await.unwrap_err();
        assert!(matches!(err, AgentError::ModelCall(m) if m == "boom"));
    }

    #[tokio::test]
    async fn invoke_stops_at_recursion_limit() {
        let mut graph = StateGraph::<i32>::new().with_recursion_limit(5);
        graph
            .add_node("spin", add("spin", 1))
            .add_edge(START, "spin")
            .add_conditional_edges("spin", Arc::new(|_: &i32| "spin".into()), None);
        let err = graph.compile().unwrap().invoke(0).await.unwrap_err();
        assert!(matches!(err, AgentError::RecursionLimit(5)));
    }
}
