//! Document tools for the drafter agent: `update` and `save`.
//!
//! Both operate on the session's document passed in through `ToolCallContext`.
//! A failed write is reported as result text, never as an error.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::tool_source::{ToolCallContent, ToolCallContext, ToolSourceError, ToolSpec};
use crate::tools::r#trait::Tool;

pub const TOOL_UPDATE: &str = "update";
pub const TOOL_SAVE: &str = "save";

fn required_str<'v>(args: &'v Value, key: &str) -> Result<&'v str, ToolSourceError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolSourceError::InvalidInput(format!("missing string '{}'", key)))
}

/// Appends `.txt` unless the name already ends with it.
pub fn with_txt_extension(filename: &str) -> String {
    if filename.ends_with(".txt") {
        filename.to_string()
    } else {
        format!("{}.txt", filename)
    }
}

/// Replaces the whole document.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateTool;

#[async_trait]
impl Tool for UpdateTool {
    fn name(&self) -> &str {
        TOOL_UPDATE
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_UPDATE.to_string(),
            description: Some("Updates the document with the provided content.".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "content": { "type": "string", "description": "The new content for the document" }
                },
                "required": ["content"]
            }),
        }
    }

    async fn call(
        &self,
        args: Value,
        ctx: &mut ToolCallContext<'_>,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let content = required_str(&args, "content")?;
        ctx.document.replace(content);
        Ok(ToolCallContent::text(format!(
            "Document has been updated successfully! The current content is:\n{}",
            ctx.document.as_str()
        )))
    }
}

/// Writes the document to `<filename>.txt`, overwriting any existing file.
///
/// Relative names resolve against `base_dir` when set, else the working directory.
#[derive(Debug, Clone, Default)]
pub struct SaveTool {
    base_dir: Option<PathBuf>,
}

impl SaveTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    fn target(&self, filename: &str) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.join(filename),
            None => Path::new(filename).to_path_buf(),
        }
    }
}

#[async_trait]
impl Tool for SaveTool {
    fn name(&self) -> &str {
        TOOL_SAVE
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_SAVE.to_string(),
            description: Some("Saves the current document to a text file.".to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filename": {
                        "type": "string",
                        "description": "Name for the text file (appends .txt if not present)"
                    }
                },
                "required": ["filename"]
            }),
        }
    }

    async fn call(
        &self,
        args: Value,
        ctx: &mut ToolCallContext<'_>,
    ) -> Result<ToolCallContent, ToolSourceError> {
        let filename = with_txt_extension(required_str(&args, "filename")?);
        let path = self.target(&filename);
        let text = match std::fs::write(&path, ctx.document.as_str()) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Document has been saved to: {}", filename);
                format!("Document has been saved successfully to '{}'.", filename)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "document save failed");
                format!("Error saving document: {}", e)
            }
        };
        Ok(ToolCallContent::text(text))
    }
}
