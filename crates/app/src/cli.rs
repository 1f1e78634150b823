use std::path::PathBuf;

use clap::Parser;

/// Timed multiple-choice quiz in the terminal.
///
/// Answers are typed one per line: `1`-`4` select an option, `s` submits,
/// `n` moves on after the explanation, `r` restarts and `q` quits.
#[derive(Parser, Debug, Default)]
#[command(name = "quiz")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to a JSON question bank (defaults to the built-in set)
    #[arg(short, long, value_name = "FILE")]
    pub bank: Option<PathBuf>,

    /// Countdown per question in seconds
    #[arg(short, long, value_name = "N")]
    pub seconds: Option<u32>,

    /// Artificial latency before the question bank is served, in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Show the explanation when time runs out instead of skipping ahead
    #[arg(long)]
    pub reveal_on_timeout: bool,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    pub verbose: bool,
}
