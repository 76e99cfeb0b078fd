//! Read a project `.env` file into a key-value map.
//!
//! Nothing is written to the process environment here; `load_and_apply` decides
//! which values win.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `.env` inside `dir`, or inside the current directory when `dir` is `None`.
fn dotenv_path(dir: Option<&Path>) -> Option<PathBuf> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().ok()?,
    };
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Strips one pair of matching surrounding quotes. Double quotes honour `\"`.
fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return value[1..value.len() - 1].replace("\\\"", "\"");
    }
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return value[1..value.len() - 1].to_string();
    }
    value.to_string()
}

/// One `KEY=VALUE` line. Blank lines, `#` comments and lines without `=` yield `None`.
/// A leading `export ` is accepted so shell-sourced files work unchanged.
fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value.trim())))
}

fn parse_dotenv(content: &str) -> HashMap<String, String> {
    content.lines().filter_map(parse_line).collect()
}

/// Loads `.env` from `dir` (or the current directory). A missing file is an empty map.
pub fn load_env_map(dir: Option<&Path>) -> std::io::Result<HashMap<String, String>> {
    match dotenv_path(dir) {
        Some(path) => Ok(parse_dotenv(&std::fs::read_to_string(path)?)),
        None => Ok(HashMap::new()),
    }
}
