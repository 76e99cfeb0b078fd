//! Plain-text conversation transcript written by the memory agent on exit.
//!
//! Format: `Your Conversation Log:\n`, then `You: <text>\n` per user turn and
//! `AI: <text>\n\n` per assistant turn, then `End of Conversation` with no
//! trailing newline. Tool results are not part of the transcript.

use std::path::Path;

use crate::message::Message;

/// Default transcript file, relative to the working directory.
pub const DEFAULT_TRANSCRIPT: &str = "logging.txt";

pub fn render(messages: &[Message]) -> String {
    let mut out = String::from("Your Conversation Log:\n");
    for message in messages {
        match message {
            Message::User(text) => {
                out.push_str("You: ");
                out.push_str(text);
                out.push('\n');
            }
            Message::Assistant { content, .. } => {
                out.push_str("AI: ");
                out.push_str(content);
                out.push_str("\n\n");
            }
            Message::System(_) | Message::Tool { .. } => {}
        }
    }
    out.push_str("End of Conversation");
    out
}

/// Overwrites `path` with the transcript and returns a line for the user.
///
/// A write failure is reported in the returned text, not as an error.
pub fn save_transcript(path: &Path, messages: &[Message]) -> String {
    match std::fs::write(path, render(messages)) {
        Ok(()) => {
            tracing::info!(path = %path.display(), turns = messages.len(), "transcript written");
            format!("Conversation saved to {}", path.display())
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "transcript write failed");
            format!("Error saving conversation to {}: {}", path.display(), e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_empty() {
        assert_eq!(render(&[]), "Your Conversation Log:\nEnd of Conversation");
    }

    /// **Scenario**: user and assistant turns are rendered, tool results skipped.
    #[test]
    fn render_turns() {
        let call = crate::message::ToolCall::new("add", "{}");
        let messages = [
            Message::user("hi"),
            Message::assistant("hello"),
            Message::assistant_with_tools("", vec![call.clone()]),
            Message::tool_result(&call, "3"),
        ];
        assert_eq!(
            render(&messages),
            "Your Conversation Log:\nYou: hi\nAI: hello\n\nAI: \n\nEnd of Conversation"
        );
    }

    #[test]
    fn save_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logging.txt");
        std::fs::write(&path, "stale").unwrap();
        let msg = save_transcript(&path, &[Message::user("a"), Message::assistant("b")]);
        assert!(msg.starts_with("Conversation saved to "), "{}", msg);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Your Conversation Log:\nYou: a\nAI: b\n\nEnd of Conversation"
        );
    }

    #[test]
    fn save_failure_is_text() {
        let dir = tempfile::tempdir().unwrap();
        let msg = save_transcript(&dir.path().join("no/such/dir.txt"), &[]);
        assert!(msg.starts_with("Error saving conversation"), "{}", msg);
    }
}
