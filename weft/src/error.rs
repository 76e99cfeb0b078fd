//! Agent execution error types.
//!
//! Returned by graph nodes and by `CompiledStateGraph::invoke`. Tool failures
//! never show up here: they are turned into tool-result text by the tools node.

use thiserror::Error;

/// Agent execution error.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. empty graph, bad request build).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The remote completion call failed (network, auth, quota). Never retried.
    #[error("model call failed: {0}")]
    ModelCall(String),

    /// The graph ran more steps than its recursion limit allows.
    #[error("recursion limit of {0} steps reached without hitting END")]
    RecursionLimit(usize),
}
