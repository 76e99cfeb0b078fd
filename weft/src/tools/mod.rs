//! Tools the agents can call, and the registry that holds them.
//!
//! - [`AddTool`], [`SubtractTool`], [`MultiplyTool`]: react agent.
//! - [`UpdateTool`], [`SaveTool`]: drafter agent, operating on the session document.

mod calculator;
mod document;
mod registry;
mod r#trait;

pub use calculator::{AddTool, MultiplyTool, SubtractTool, TOOL_ADD, TOOL_MULTIPLY, TOOL_SUBTRACT};
pub use document::{with_txt_extension, SaveTool, UpdateTool, TOOL_SAVE, TOOL_UPDATE};
pub use r#trait::Tool;
pub use registry::ToolRegistry;

use std::path::PathBuf;

/// `add`, `subtract`, `multiply`, in that order.
pub fn calculator_tools() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(AddTool));
    registry.register(Box::new(SubtractTool));
    registry.register(Box::new(MultiplyTool));
    registry
}

/// `update`, `save`. `save` writes under `save_dir` when given, else the working directory.
pub fn document_tools(save_dir: Option<PathBuf>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(UpdateTool));
    registry.register(Box::new(match save_dir {
        Some(dir) => SaveTool::in_dir(dir),
        None => SaveTool::new(),
    }));
    registry
}
