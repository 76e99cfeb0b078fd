//! Structured tracing for graph execution.

use std::fmt::Debug;

use super::Next;
use crate::error::AgentError;

pub fn log_graph_start(first_node: &str) {
    tracing::debug!(first_node, "Starting graph execution");
}

pub fn log_node_start<S: Debug>(node_id: &str, state: &S) {
    tracing::debug!(node_id, "Starting node execution");
    tracing::trace!(node_id, state = ?state, "Node execution: state");
}

pub fn log_node_complete(node_id: &str, next: &Next) {
    tracing::debug!(node_id, ?next, "Node execution complete");
}

pub fn log_routing(from: &str, to: &str) {
    tracing::debug!(from, to, "conditional routing");
}

pub fn log_graph_complete(steps: usize) {
    tracing::debug!(steps, "Graph execution complete");
}

pub fn log_graph_error(node_id: &str, error: &AgentError) {
    tracing::error!(node_id, %error, "Graph execution error");
}
