//! CLI - reedline-based REPL interface
//!
//! Line editing and history come from reedline; commands are parsed and
//! executed by the `app` module.

use std::borrow::Cow;
use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline, Signal};

use crate::app::{execute_command, parse_command, Flow, Session};
use crate::dump::DumpMode;

/// Prompt showing the dump mode and address
pub struct CpuPrompt {
    address: u64,
    mode: DumpMode,
}

impl CpuPrompt {
    pub fn new() -> Self {
        Self {
            address: 0,
            mode: DumpMode::default(),
        }
    }

    /// Follow the session after each command
    pub fn update(&mut self, session: &Session) {
        self.address = session.address();
        self.mode = session.view().mode();
    }
}

impl Default for CpuPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for CpuPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(format!("[{}:{:#x}]", self.mode, self.address))
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("> ")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(&self, history_search: PromptHistorySearch) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "(failed) ",
        };
        Cow::Owned(format!("(search: {}{}) ", prefix, history_search.term))
    }
}

/// Run a list of commands without a REPL (`--command`). Stops at the first
/// failing command.
pub fn run_commands<S: AsRef<str>>(session: &mut Session, commands: &[S]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in commands {
        log::debug!("command: {}", line.as_ref());
        if execute_command(session, parse_command(line.as_ref()), &mut out)? == Flow::Quit {
            break;
        }
    }
    out.flush()?;
    Ok(())
}

/// Run the CLI REPL
pub fn run_cli(session: &mut Session) -> Result<()> {
    let mut line_editor = Reedline::create();
    let mut prompt = CpuPrompt::new();
    prompt.update(session);

    println!(
        "{}",
        "╔══════════════════════════════════════════════════════════════╗".cyan()
    );
    println!(
        "{}",
        "║  cpuview - Type '?' for help, 'q' to quit                    ║".cyan()
    );
    println!(
        "{}",
        "╚══════════════════════════════════════════════════════════════╝".cyan()
    );

    loop {
        let sig = line_editor.read_line(&prompt)?;
        match sig {
            Signal::Success(buffer) => {
                let input = buffer.trim();
                if input.is_empty() {
                    continue;
                }

                let cmd = parse_command(input);
                let mut out = io::stdout();
                match execute_command(session, cmd, &mut out) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => println!("{} {:#}", "[!]".red(), e),
                }
                prompt.update(session);
            }
            Signal::CtrlD | Signal::CtrlC => {
                println!("\n[*] Interrupted");
                break;
            }
        }
    }

    Ok(())
}
