use serde_json::Value;

use crate::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
use crate::tools::r#trait::Tool;

/// Fixed set of tools an agent exposes.
///
/// Built once at startup and never mutated afterwards. `list()` returns specs in
/// registration order so the request sent to the model is deterministic.
///
/// # Examples
///
/// ```
/// use weft::tools::{AddTool, MultiplyTool, ToolRegistry};
///
/// let mut registry = ToolRegistry::new();
/// registry.register(Box::new(AddTool));
/// registry.register(Box::new(MultiplyTool));
/// let names: Vec<_> = registry.list().into_iter().map(|s| s.name).collect();
/// assert_eq!(names, ["add", "multiply"]);
/// ```
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool. A tool with the same name is replaced in place.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(i) => self.tools[i] = tool,
            None => self.tools.push(tool),
        }
    }

    /// Specs of all tools, in registration order.
    pub fn list(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|tool| tool.spec()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Calls a tool by name.
    ///
    /// # Errors
    ///
    /// `ToolSourceError::NotFound` if no tool has that name; otherwise whatever the tool returns.
    pub async fn call(
        &self,
        name: &str,
        args: Value,
        ctx: &mut ToolCallContext<'_>,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| ToolSourceError::NotFound(name.to_string()))?;
        tool.call(args, ctx).await
    }
}
