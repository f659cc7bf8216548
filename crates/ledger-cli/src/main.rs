//! Ledger CLI - Script-driven command interpreter for the hash-chained ledger.
//!
//! Reads newline-delimited commands from a script file or stdin and prints
//! one result line per command.

pub mod command;
pub mod config;
pub mod processor;
pub mod telemetry;

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use crate::processor::CommandProcessor;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "ledger")]
#[command(about = "Run ledger scripts against an in-memory hash-chained ledger")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Script to execute (reads stdin when omitted)
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// TOML file with ledger name, description and seed
    #[arg(short, long, env = "LEDGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "ledger_core=debug"
    #[arg(long, env = "LEDGER_LOG", default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Render blocks and transactions as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with status 1 if any command failed
    #[arg(long)]
    pub strict: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_telemetry(&cli.log_level, cli.json_logs)?;

    let mut processor = CommandProcessor::new().with_json(cli.json);
    if let Some(path) = &cli.config {
        let config = config::load_config(path)?;
        processor.initialize(&config);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script '{}'", path.display()))?;
            processor.process(BufReader::new(file), &mut out)?
        }
        None => processor.process(io::stdin().lock(), &mut out)?,
    };

    tracing::info!(
        "Processed {} commands, {} failed",
        summary.commands,
        summary.failures
    );

    if cli.strict && summary.failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}
