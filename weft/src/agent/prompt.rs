//! Instruction prompts and canned turns.

/// Instruction prefix for the react agent.
pub const REACT_SYSTEM_PROMPT: &str =
    "You are an AI assistant that performs calculations using tools.";

/// Built-in request for `weft react --demo`.
pub const REACT_DEMO_MESSAGE: &str =
    "Add 40 + 12 and then multiply the result by 6. Also tell me a joke please.";

/// First user turn of a drafter session, sent before any input is read.
pub const DRAFTER_OPENING: &str =
    "I'm ready to help you update a document. What would you like to create?";

/// Drafter instruction prefix; rebuilt on every model call so it shows the current document.
pub fn drafter_prompt(document: &str) -> String {
    format!(
        "You are Drafter, a helpful writing assistant. You help users update and modify documents.\n\
         - Use the 'update' tool to modify document content.\n\
         - Use the 'save' tool to save the document and finish.\n\
         - Always show the current document state after modifications.\n\
         Current document content: {}",
        document
    )
}
