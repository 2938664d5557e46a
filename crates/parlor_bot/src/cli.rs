//! Command-line interface for the console gateway.

use clap::Parser;
use std::path::PathBuf;

/// Parlor - chat games played from the terminal
///
/// Reads `<conversation> <sender> <text>` lines from stdin and prints the
/// bot's replies as `[conversation] text`.
#[derive(Parser, Debug)]
#[command(name = "parlor_bot")]
#[command(about = "Turn-based chat games with per-turn time limits", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the turn timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Seed AI choices and dice rolls for reproducible play
    #[arg(long)]
    pub seed: Option<u64>,
}
