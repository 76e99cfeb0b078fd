//! Transitions of the conversation state machine.
//!
//! Nodes call these after they change the turn list and store the result in
//! `ConversationState::phase`; graph routers only read that field.

use super::{ConversationState, Phase};
use crate::tools::TOOL_SAVE;

/// Typed by the user to end a session (compared case-insensitively).
pub const EXIT_KEYWORD: &str = "exit";

/// Substring of a `save` result that ends an `UntilSaved` session.
pub const COMPLETION_MARKER: &str = "saved";

/// What a session does once the model stops asking for tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPolicy {
    /// One model call per user turn, no tools (chat, memory).
    Linear,
    /// Model and tools alternate until the model answers without tools (react).
    UntilReply,
    /// Like `UntilReply`, but a `save` result containing the completion marker ends the session (drafter).
    UntilSaved,
}

pub fn is_exit_keyword(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_KEYWORD)
}

pub fn is_completion_marker(tool_result: &str) -> bool {
    tool_result.to_lowercase().contains(COMPLETION_MARKER)
}

/// True when the most recent tool result came from `save` and carries the completion marker.
/// No tool result at all means "continue".
pub fn completion_reached(state: &ConversationState) -> bool {
    state
        .latest_tool_result()
        .map(|(tool, content)| tool == TOOL_SAVE && is_completion_marker(content))
        .unwrap_or(false)
}

/// Phase after an assistant turn was appended.
pub fn after_model(policy: LoopPolicy, state: &ConversationState) -> Phase {
    if !state.pending_tool_calls().is_empty() {
        return Phase::AwaitingToolDispatch;
    }
    match policy {
        LoopPolicy::Linear | LoopPolicy::UntilReply => Phase::AwaitingUser,
        LoopPolicy::UntilSaved if completion_reached(state) => Phase::Terminated,
        LoopPolicy::UntilSaved => Phase::AwaitingUser,
    }
}

/// Phase after every pending tool call produced its result turn.
pub fn after_dispatch(policy: LoopPolicy, state: &ConversationState) -> Phase {
    match policy {
        LoopPolicy::UntilSaved if completion_reached(state) => Phase::Terminated,
        _ => Phase::AwaitingModel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Message, ToolCall};

    fn state_with_tool_result(content: &str) -> ConversationState {
        let mut state = ConversationState::new();
        state.submit_user("save it as x");
        let call = ToolCall::new("save", r#"{"filename":"x"}"#);
        state.push(Message::assistant_with_tools("", vec![call.clone()]));
        state.push(Message::tool_result(&call, content));
        state
    }

    #[test]
    fn exit_keyword_is_case_insensitive() {
        assert!(is_exit_keyword("exit"));
        assert!(is_exit_keyword("EXIT"));
        assert!(is_exit_keyword("  Exit \n"));
        assert!(!is_exit_keyword("exit now"));
        assert!(!is_exit_keyword(""));
    }

    /// **Scenario**: a successful save result terminates the drafter.
    #[test]
    fn saved_result_terminates() {
        let state = state_with_tool_result("Document has been saved successfully to 'x.txt'.");
        assert_eq!(after_dispatch(LoopPolicy::UntilSaved, &state), Phase::Terminated);
    }

    /// **Scenario**: a failed save keeps the drafter going.
    #[test]
    fn failed_save_continues() {
        let state = state_with_tool_result("Error saving document: disk full");
        assert_eq!(after_dispatch(LoopPolicy::UntilSaved, &state), Phase::AwaitingModel);
    }

    /// **Scenario**: only the most recent tool result counts; an older save does not end the session.
    #[test]
    fn only_most_recent_result_is_checked() {
        let mut state = state_with_tool_result("Document has been saved successfully to 'x.txt'.");
        let call = ToolCall::new("update", r#"{"content":"more"}"#);
        state.push(Message::assistant_with_tools("", vec![call.clone()]));
        state.push(Message::tool_result(&call, "Document has been updated successfully!"));
        assert!(!completion_reached(&state));
    }

    /// **Scenario**: an update whose text mentions "saved" does not end the drafter.
    #[test]
    fn update_mentioning_saved_continues() {
        let mut state = ConversationState::new();
        state.submit_user("write that I saved the cat");
        let call = ToolCall::new("update", r#"{"content":"I saved the cat"}"#);
        state.push(Message::assistant_with_tools("", vec![call.clone()]));
        state.push(Message::tool_result(
            &call,
            "Document has been updated successfully! The current content is:\nI saved the cat",
        ));
        assert!(!completion_reached(&state));
        assert_eq!(after_dispatch(LoopPolicy::UntilSaved, &state), Phase::AwaitingModel);
    }

    #[test]
    fn no_tool_result_means_continue() {
        let mut state = ConversationState::new();
        state.submit_user("hi");
        assert!(!completion_reached(&state));
    }

    /// **Scenario**: tool results never terminate the react loop, even when they say "saved".
    #[test]
    fn until_reply_ignores_marker() {
        let state = state_with_tool_result("saved");
        assert_eq!(after_dispatch(LoopPolicy::UntilReply, &state), Phase::AwaitingModel);
    }

    #[test]
    fn after_model_routes_tool_calls_to_dispatch() {
        let mut state = ConversationState::new();
        state.submit_user("40 + 12");
        state.push(Message::assistant_with_tools(
            "",
            vec![ToolCall::new("add", r#"{"a":40,"b":12}"#)],
        ));
        for policy in [LoopPolicy::Linear, LoopPolicy::UntilReply, LoopPolicy::UntilSaved] {
            assert_eq!(after_model(policy, &state), Phase::AwaitingToolDispatch);
        }
    }

    /// **Scenario**: an assistant turn with an empty tool list counts as no tool calls.
    #[test]
    fn after_model_empty_tool_list_returns_to_user() {
        let mut state = ConversationState::new();
        state.submit_user("hi");
        state.push(Message::assistant_with_tools("hello", vec![]));
        assert_eq!(after_model(LoopPolicy::Linear, &state), Phase::AwaitingUser);
        assert_eq!(after_model(LoopPolicy::UntilReply, &state), Phase::AwaitingUser);
        assert_eq!(after_model(LoopPolicy::UntilSaved, &state), Phase::AwaitingUser);
    }

    #[test]
    fn after_model_until_saved_terminates_on_marker() {
        let mut state = state_with_tool_result("Document has been saved successfully to 'x.txt'.");
        state.push(Message::assistant("All done."));
        assert_eq!(after_model(LoopPolicy::UntilSaved, &state), Phase::Terminated);
    }
}
