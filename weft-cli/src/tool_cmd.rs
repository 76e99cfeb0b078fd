//! `weft tools <agent>`: print the tool specs an agent sends to the model.

use std::io::Write;

use weft::AgentKind;

/// Maximum length for description in the list table. Longer descriptions are truncated with "...".
const LIST_DESC_MAX_LEN: usize = 60;

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Name/description table, or the full specs as pretty JSON when `json` is set.
pub fn list_tools<W: Write>(agent: AgentKind, json: bool, out: &mut W) -> std::io::Result<()> {
    let tools = agent.tools(None).list();
    if json {
        let js = serde_json::to_string_pretty(&tools)?;
        return writeln!(out, "{}", js);
    }
    if tools.is_empty() {
        return writeln!(out, "{} has no tools", agent);
    }
    let width = tools.iter().map(|t| t.name.len()).max().unwrap_or(4).max(4);
    writeln!(out, "{:<width$}\tDESCRIPTION", "NAME", width = width)?;
    for spec in &tools {
        let desc = spec.description.as_deref().unwrap_or("");
        writeln!(
            out,
            "{:<width$}\t{}",
            spec.name,
            truncate(desc, LIST_DESC_MAX_LEN),
            width = width
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_react_tools_in_order() {
        let mut out = Vec::new();
        list_tools(AgentKind::React, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let names: Vec<_> = text
            .lines()
            .skip(1)
            .map(|l| l.split('\t').next().unwrap().trim())
            .collect();
        assert_eq!(names, ["add", "subtract", "multiply"]);
    }

    #[test]
    fn json_has_schemas() {
        let mut out = Vec::new();
        list_tools(AgentKind::Drafter, true, &mut out).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v[1]["name"], "save");
        assert_eq!(v[1]["input_schema"]["required"][0], "filename");
    }

    #[test]
    fn chat_has_no_tools() {
        let mut out = Vec::new();
        list_tools(AgentKind::Chat, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "chat has no tools\n");
    }

    #[test]
    fn truncate_long_description() {
        let s = "x".repeat(100);
        assert_eq!(truncate(&s, 10), "xxxxxxx...");
        assert_eq!(truncate("short", 10), "short");
    }
}
