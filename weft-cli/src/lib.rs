//! Library side of the `weft` binary: session loop, input sources, display
//! rendering and the `tools` subcommand. Kept out of `main.rs` so the loop can
//! be driven by scripted input in tests.

mod display;
mod input;
mod run;
mod tool_cmd;

pub use display::{pretty, render_turn};
pub use input::{InputSource, ScriptedInput, StdinSource};
pub use run::{build_llm, run_agent, RunError, RunOptions};
pub use tool_cmd::list_tools;
