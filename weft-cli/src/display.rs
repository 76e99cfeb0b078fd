//! How each agent prints the turns a step produced.
//!
//! - chat, memory: `AI: <reply>`.
//! - drafter: `USER:` echo, `AI:`, `USING TOOLS: [..]`, `TOOL RESULT: ..`.
//! - react: every turn as a titled block, tool calls listed with their arguments.

use weft::{AgentKind, Message};

const RULE_WIDTH: usize = 80;

/// Text printed for one turn; empty when the agent does not show that kind of turn.
pub fn render_turn(kind: AgentKind, message: &Message) -> String {
    match kind {
        AgentKind::Chat | AgentKind::Memory => match message {
            Message::Assistant { content, .. } => format!("\nAI: {}", content),
            _ => String::new(),
        },
        AgentKind::Drafter => render_drafter(message),
        AgentKind::React => pretty(message),
    }
}

fn render_drafter(message: &Message) -> String {
    match message {
        Message::User(text) => format!("\nUSER: {}", text),
        Message::Assistant {
            content,
            tool_calls,
        } => {
            let mut out = format!("\nAI: {}", content);
            if !tool_calls.is_empty() {
                let names: Vec<&str> = tool_calls.iter().map(|c| c.name.as_str()).collect();
                out.push_str(&format!("\nUSING TOOLS: [{}]", names.join(", ")));
            }
            out
        }
        Message::Tool { content, .. } => format!("\nTOOL RESULT: {}", content),
        Message::System(_) => String::new(),
    }
}

fn title_rule(title: &str) -> String {
    let title = format!(" {} ", title);
    let pad = RULE_WIDTH.saturating_sub(title.len());
    let left = pad / 2;
    format!("{}{}{}", "=".repeat(left), title, "=".repeat(pad - left))
}

/// Titled block for one turn, e.g. `===== Ai Message =====`, a blank line, then the content.
pub fn pretty(message: &Message) -> String {
    let title = match message {
        Message::System(_) => "System Message",
        Message::User(_) => "Human Message",
        Message::Assistant { .. } => "Ai Message",
        Message::Tool { .. } => "Tool Message",
    };
    let mut out = title_rule(title);
    if let Message::Tool { name, .. } = message {
        out.push_str(&format!("\nName: {}", name));
    }
    out.push_str("\n\n");
    out.push_str(message.content());
    let calls = message.tool_calls();
    if !calls.is_empty() {
        out.push_str("\nTool Calls:");
        for call in calls {
            let id = call.id.as_deref().unwrap_or("-");
            out.push_str(&format!("\n  {} ({})\n Call ID: {}\n  Args:", call.name, id, id));
            match serde_json::from_str::<serde_json::Value>(&call.arguments) {
                Ok(serde_json::Value::Object(map)) => {
                    for (k, v) in map {
                        out.push_str(&format!("\n    {}: {}", k, v));
                    }
                }
                _ => out.push_str(&format!("\n    {}", call.arguments)),
            }
        }
    }
    out
}
