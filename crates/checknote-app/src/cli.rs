use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "checknote", version, about = "Keyboard-driven clinical checklist to note")]
pub struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Fill in the checklist interactively (default).
    Run,
    /// Print the note for the saved answers.
    Print {
        /// Emit the HTML rendering instead of plain text.
        #[arg(long)]
        rich: bool,
    },
    /// Forget the saved answers and position.
    Reset,
    /// List the questions with their shortcuts.
    Questions,
}
