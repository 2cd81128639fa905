//! `metricmancer` — a CLI front end over the `metricmancer` analysis
//! library: cyclomatic/cognitive complexity, churn, ownership, hotspots,
//! and ref-to-ref complexity deltas.
//!
//! Parses a handful of threshold flags with `clap`, calls `analyze`/`delta`,
//! and serializes the result to JSON with `serde_json`. No HTML/templated
//! output, no report-folder management — that layer is out of scope here.
mod cli;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use metricmancer::config::{AnalysisConfig, CyclomaticThresholds};

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

fn build_config(cli: &Cli) -> AnalysisConfig {
    let roots = if cli.roots.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cli.roots.clone()
    };

    let mut config = AnalysisConfig::new(roots);
    config.cyclomatic = CyclomaticThresholds {
        low: cli.threshold_low,
        high: cli.threshold_high,
    };
    config.churn_period_days = cli.churn_period_days;
    config.significance_threshold = cli.significance_threshold;
    config.git_timeout = std::time::Duration::from_secs(cli.git_timeout_secs);
    config
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli);

    let result = match &cli.command {
        Some(Command::Delta { base_ref, head_ref }) => {
            metricmancer::delta(&config, base_ref, head_ref).map(|changes| serde_json::to_value(changes))
        }
        None => metricmancer::analyze(&config).map(|repos| serde_json::to_value(repos)),
    };

    match result {
        Ok(Ok(value)) => println!("{}", serde_json::to_string_pretty(&value).unwrap()),
        Ok(Err(err)) => {
            eprintln!("error: failed to serialize output: {err}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
