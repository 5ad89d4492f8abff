//! App module - session state and commands
//!
//! Shared by the interactive REPL and one-shot `--command` runs.

mod commands;
mod state;

pub use commands::*;
pub use state::*;
