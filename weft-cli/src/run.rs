//! Runs one agent session against an input source and an output sink.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use weft::agent::REACT_DEMO_MESSAGE;
use weft::transcript::{save_transcript, DEFAULT_TRANSCRIPT};
use weft::{AgentKind, ChatOpenAI, LlmClient, Message, ModelSettings, Session, SessionError, ToolRegistry};

use crate::display::render_turn;
use crate::input::InputSource;

/// Options for one agent run, built from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub agent: AgentKind,
    /// Memory agent transcript path.
    pub transcript: PathBuf,
    /// Directory the drafter's `save` writes into; working directory when unset.
    pub save_dir: Option<PathBuf>,
    /// React: run this single request instead of reading input.
    pub message: Option<String>,
}

impl RunOptions {
    pub fn new(agent: AgentKind) -> Self {
        Self {
            agent,
            transcript: PathBuf::from(DEFAULT_TRANSCRIPT),
            save_dir: None,
            message: None,
        }
    }

    /// React with the built-in demo request.
    pub fn demo() -> Self {
        Self {
            message: Some(REACT_DEMO_MESSAGE.to_string()),
            ..Self::new(AgentKind::React)
        }
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Model client for `tools`: the OpenAI-compatible endpoint from settings, with the tool specs bound.
pub fn build_llm(settings: &ModelSettings, tools: &ToolRegistry) -> Arc<dyn LlmClient> {
    Arc::new(ChatOpenAI::from_settings(settings).with_tools(tools.list()))
}

fn print_turns<W: Write>(out: &mut W, kind: AgentKind, turns: &[Message]) -> std::io::Result<()> {
    for turn in turns {
        let text = render_turn(kind, turn);
        if !text.is_empty() {
            writeln!(out, "{}", text)?;
        }
    }
    out.flush()
}

/// Runs a full session: banner, optional opening turn, input loop until exit
/// keyword, termination or end of input, then the agent's epilogue.
///
/// A model failure ends the run with `RunError::Session`.
pub async fn run_agent<I, W>(
    opts: &RunOptions,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    input: &mut I,
    out: &mut W,
) -> Result<(), RunError>
where
    I: InputSource + ?Sized,
    W: Write,
{
    let kind = opts.agent;
    writeln!(out, "\n{}", kind.banner())?;
    let mut session = Session::new(kind, llm, tools)?;
    info!(agent = %kind, "session started");

    let opening = session.open().await?;
    let shown: Vec<Message> = opening.into_iter().filter(|m| !m.is_user()).collect();
    print_turns(out, kind, &shown)?;

    if let (AgentKind::React, Some(message)) = (kind, opts.message.as_deref()) {
        let turns = session.submit(message).await?;
        print_turns(out, kind, &turns)?;
    } else {
        while !session.is_terminated() {
            let Some(line) = input.next_line(kind.input_prompt()).await? else {
                break;
            };
            let turns = session.submit(&line).await?;
            // chat/memory never echo the user; the terminal already shows the line
            print_turns(out, kind, &turns)?;
        }
    }

    let state = session.finish();
    info!(agent = %kind, turns = state.messages().len(), "session finished");
    match kind {
        AgentKind::Memory => writeln!(out, "{}", save_transcript(&opts.transcript, state.messages()))?,
        _ => {
            if let Some(banner) = kind.closing_banner() {
                writeln!(out, "\n{}", banner)?;
            }
        }
    }
    Ok(())
}
