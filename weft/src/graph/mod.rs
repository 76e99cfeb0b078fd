//! State graph: nodes, explicit edges and conditional edges over one state type.
//!
//! Build with [`StateGraph`], compile into an immutable [`CompiledStateGraph`],
//! run with `invoke(state)`.

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod next;
mod node;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::{CompiledStateGraph, DEFAULT_RECURSION_LIMIT};
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use next::Next;
pub use node::Node;
pub use state_graph::{StateGraph, END, START};
