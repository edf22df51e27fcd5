//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hours_core::CalendarDate;

/// Free-text time tracking.
///
/// Turns entries like `1h #Support: Ongoing @aba update geography` into
/// structured time records.
#[derive(Debug, Parser)]
#[command(name = "hours", version, about, long_about = None)]
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
    /// Parse one time entry against the catalog.
    Parse(ParseArgs),

    /// List the projects in the catalog.
    Projects {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the clients in the catalog.
    Clients {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// The entry text, e.g. `1h #out dentist`.
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Day the entry belongs to (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<CalendarDate>,

    /// Output the time entry as JSON.
    #[arg(long)]
    pub json: bool,
}
