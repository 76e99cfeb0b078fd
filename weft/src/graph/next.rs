//! What a node asks the runner to do next.

/// Next step after running a node.
///
/// Ignored when the node has conditional edges: the router decides.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    /// Follow the node's outgoing edge (END when it has none).
    Continue,
    /// Stop and return the current state.
    End,
}
