//! Process environment for weft: XDG `config.toml` plus project `.env`.
//!
//! Precedence for every key: **existing env > .env > XDG**. The agents only read
//! `GEMINI_API_KEY`, `WEFT_MODEL`, `WEFT_API_BASE`, `RUST_LOG` and `LOG_FILE`,
//! but any key in either file is applied.

mod dotenv;
mod xdg_toml;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

/// Serializes tests that read or change process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Merges the two file sources; `.env` values shadow XDG values.
fn merge_sources(
    xdg: HashMap<String, String>,
    dotenv: HashMap<String, String>,
) -> HashMap<String, String> {
    let mut merged = xdg;
    merged.extend(dotenv);
    merged
}

/// Loads both sources and sets every key that is not already in the environment.
///
/// * `app_name`: directory under the XDG config home, e.g. `"weft"`.
/// * `dotenv_dir`: where to look for `.env`; `None` means the current directory.
pub fn load_and_apply(app_name: &str, dotenv_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg = xdg_toml::load_env_map(app_name)?;
    let dotenv = dotenv::load_env_map(dotenv_dir).map_err(LoadError::DotenvRead)?;

    for (key, value) in merge_sources(xdg, dotenv) {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
        }
    }
    Ok(())
}
