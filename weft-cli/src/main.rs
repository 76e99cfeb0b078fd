//! Weft CLI binary: run one of the four agents from the terminal.
//!
//! Subcommands: `chat`, `memory`, `react`, `drafter`, `tools <agent>`.

mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use weft::transcript::DEFAULT_TRANSCRIPT;
use weft::{AgentKind, ModelSettings};
use weft_cli::{build_llm, list_tools, run_agent, RunOptions, StdinSource};

#[derive(Parser, Debug)]
#[command(name = "weft")]
#[command(about = "Weft — small conversational agents on a state graph")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Verbose: print logs (node steps, tool calls, model requests) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Plain chat; the whole history is sent every turn
    Chat,
    /// Chat that writes the conversation transcript on exit
    Memory(MemoryArgs),
    /// Calculator agent: add, subtract, multiply
    React(ReactArgs),
    /// Document drafting agent: update, save
    Drafter(DrafterArgs),
    /// List the tools an agent exposes to the model
    Tools(ToolsArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct MemoryArgs {
    /// Transcript file (overwritten on exit)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_TRANSCRIPT)]
    transcript: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
struct ReactArgs {
    /// Run a single request and exit
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Run the built-in demo request (ignored when --message is given)
    #[arg(long)]
    demo: bool,
}

#[derive(clap::Args, Debug, Clone)]
struct DrafterArgs {
    /// Directory `save` writes into; default: current directory
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
struct ToolsArgs {
    /// Agent name: chat, memory, react or drafter
    agent: AgentKind,

    /// Print full specs (including input schema) as JSON
    #[arg(long)]
    json: bool,
}

fn options(cmd: &Command) -> Option<RunOptions> {
    Some(match cmd {
        Command::Chat => RunOptions::new(AgentKind::Chat),
        Command::Memory(a) => RunOptions {
            transcript: a.transcript.clone(),
            ..RunOptions::new(AgentKind::Memory)
        },
        Command::React(a) => match (&a.message, a.demo) {
            (Some(m), _) => RunOptions {
                message: Some(m.clone()),
                ..RunOptions::new(AgentKind::React)
            },
            (None, true) => RunOptions::demo(),
            (None, false) => RunOptions::new(AgentKind::React),
        },
        Command::Drafter(a) => RunOptions {
            save_dir: a.save_dir.clone(),
            ..RunOptions::new(AgentKind::Drafter)
        },
        Command::Tools(_) => return None,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::load_and_apply("weft", None)?;
    let args = Args::parse();
    logging::init(args.verbose)?;

    if let Command::Tools(t) = &args.cmd {
        list_tools(t.agent, t.json, &mut std::io::stdout())?;
        return Ok(());
    }
    let Some(opts) = options(&args.cmd) else {
        return Ok(());
    };

    let tools = opts.agent.tools(opts.save_dir.clone());
    let llm = build_llm(&ModelSettings::from_env(), &tools);
    let mut input = StdinSource::new();
    run_agent(&opts, llm, tools, &mut input, &mut std::io::stdout()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("weft").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn memory_default_transcript() {
        let opts = options(&parse(&["memory"]).cmd).unwrap();
        assert_eq!(opts.agent, AgentKind::Memory);
        assert_eq!(opts.transcript, PathBuf::from("logging.txt"));
    }

    #[test]
    fn react_message_wins_over_demo() {
        let opts = options(&parse(&["react", "--demo", "-m", "2+2"]).cmd).unwrap();
        assert_eq!(opts.message.as_deref(), Some("2+2"));
        let opts = options(&parse(&["react", "--demo"]).cmd).unwrap();
        assert_eq!(opts.message.as_deref(), Some(weft::agent::REACT_DEMO_MESSAGE));
        let opts = options(&parse(&["react"]).cmd).unwrap();
        assert!(opts.message.is_none());
    }

    #[test]
    fn tools_parses_agent() {
        let args = parse(&["-v", "tools", "drafter", "--json"]);
        assert!(args.verbose);
        match args.cmd {
            Command::Tools(t) => {
                assert_eq!(t.agent, AgentKind::Drafter);
                assert!(t.json);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(Args::try_parse_from(["weft", "tools", "planner"]).is_err());
    }
}
