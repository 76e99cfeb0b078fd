//! Graph compilation error.

use thiserror::Error;

/// Returned by `StateGraph::compile()` when the edges do not describe a runnable graph.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// A node id in an edge was not registered via `add_node` (and is not START/END).
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge from START, or more than one.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// Nothing ever reaches END.
    #[error("graph has no path to END")]
    MissingEnd,

    /// A node has more than one outgoing edge.
    #[error("node has more than one outgoing edge: {0}")]
    Branch(String),

    /// A node has both an outgoing edge and conditional edges; it must have exactly one.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// A value in a conditional path_map is not a valid node id or END.
    #[error("conditional path_map invalid target: {0}")]
    InvalidConditionalPathMap(String),
}
