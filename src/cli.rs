/// CLI argument definitions for the `metricmancer` binary.
///
/// Defines the top-level flags and the `delta` subcommand using the
/// `clap` derive macros. This binary is a thin JSON front end over the
/// `analyze`/`delta` library entry points — no HTML/templated output,
/// no report-folder management.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Analyze one or more repositories and print their metrics as JSON.
#[derive(Parser)]
#[command(name = "metricmancer", version, about = "Source-code health and hotspot analysis")]
pub struct Cli {
    /// Directories or files to analyze (default: current directory)
    pub roots: Vec<PathBuf>,

    /// Cyclomatic complexity threshold below which a file is "low" (default: 10)
    #[arg(long, default_value = "10")]
    pub threshold_low: f64,

    /// Cyclomatic complexity threshold above which a file is "high" (default: 20)
    #[arg(long, default_value = "20")]
    pub threshold_high: f64,

    /// Churn analysis window in days (default: 30)
    #[arg(long, default_value = "30")]
    pub churn_period_days: u32,

    /// Ownership significance threshold, 0.0-1.0 (default: 0.25)
    #[arg(long, default_value = "0.25")]
    pub significance_threshold: f64,

    /// Wall-clock budget for a single git operation, in seconds (default: 60)
    #[arg(long, default_value = "60")]
    pub git_timeout_secs: u64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands beyond the default full analysis.
#[derive(Subcommand)]
pub enum Command {
    /// Compare two refs and report per-file, per-function complexity deltas
    Delta {
        /// Base ref (e.g. a commit, tag, or branch)
        base_ref: String,

        /// Head ref to compare against the base
        head_ref: String,
    },
}
