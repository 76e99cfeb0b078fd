//! Conversation turns.
//!
//! One enum for every kind of turn so new kinds are a compile-time checked
//! addition. `System` is only used as the instruction prefix of a request and is
//! never stored in a conversation.

use serde::{Deserialize, Serialize};

/// A single tool invocation requested by the model.
///
/// `arguments` is the raw JSON string from the provider; the tools node parses it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider id used to pair the result with this call.
    pub id: Option<String>,
    /// Tool name as registered in the `ToolRegistry`.
    pub name: String,
    /// Arguments as a JSON string.
    pub arguments: String,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// Instruction prefix; sent with a request, never appended to history.
    System(String),
    /// User input.
    User(String),
    /// Model reply, possibly requesting tool invocations.
    Assistant {
        content: String,
        #[serde(default)]
        tool_calls: Vec<ToolCall>,
    },
    /// Result of one tool invocation, in the order the calls were requested.
    Tool {
        call_id: Option<String>,
        name: String,
        content: String,
    },
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Assistant turn without tool calls.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn assistant_with_tools(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls,
        }
    }

    pub fn tool_result(call: &ToolCall, content: impl Into<String>) -> Self {
        Self::Tool {
            call_id: call.id.clone(),
            name: call.name.clone(),
            content: content.into(),
        }
    }

    /// Text content of any turn.
    pub fn content(&self) -> &str {
        match self {
            Self::System(c) | Self::User(c) => c,
            Self::Assistant { content, .. } | Self::Tool { content, .. } => content,
        }
    }

    /// Name of the tool that produced a result turn.
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            Self::Tool { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Requested tool invocations; empty for everything but assistant turns that asked for tools.
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Self::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant { .. })
    }

    pub fn is_tool_result(&self) -> bool {
        matches!(self, Self::Tool { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: constructors produce the right variant and `content` reads through all of them.
    #[test]
    fn constructors_and_content() {
        assert!(matches!(Message::system("s"), Message::System(c) if c == "s"));
        assert_eq!(Message::user("u").content(), "u");
        assert_eq!(Message::assistant("a").content(), "a");
        let call = ToolCall::new("add", r#"{"a":1,"b":2}"#).with_id("call-1");
        let result = Message::tool_result(&call, "3");
        assert_eq!(result.content(), "3");
        assert!(matches!(
            result,
            Message::Tool { ref call_id, ref name, .. } if call_id.as_deref() == Some("call-1") && name == "add"
        ));
    }

    /// **Scenario**: only assistant turns expose tool calls.
    #[test]
    fn tool_calls_only_on_assistant() {
        let calls = vec![ToolCall::new("add", "{}"), ToolCall::new("multiply", "{}")];
        let msg = Message::assistant_with_tools("", calls.clone());
        assert_eq!(msg.tool_calls(), calls.as_slice());
        assert!(Message::user("hi").tool_calls().is_empty());
        assert!(Message::assistant("plain").tool_calls().is_empty());
    }

    /// **Scenario**: an assistant turn serialized without `tool_calls` still deserializes.
    #[test]
    fn assistant_deserializes_without_tool_calls_field() {
        let msg: Message =
            serde_json::from_str(r#"{"Assistant":{"content":"hello"}}"#).expect("deserialize");
        assert_eq!(msg, Message::assistant("hello"));
    }
}
