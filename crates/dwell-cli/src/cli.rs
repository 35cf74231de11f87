//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Activity tracker for the niri compositor.
///
/// Follows window focus and idle state and prints a timeline of what you
/// were working on, one JSON object per line.
#[derive(Debug, Parser)]
#[command(name = "dwell", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Track activity from the running compositor (the default).
    Run,

    /// Replay recorded niri and swayidle lines through the tracker.
    Replay {
        /// File of recorded lines. Reads stdin when omitted.
        file: Option<PathBuf>,
    },

    /// Show the activity name a window title resolves to.
    Resolve {
        /// The window title to test.
        title: String,
    },
}
