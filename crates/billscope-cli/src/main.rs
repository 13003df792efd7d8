//! Billscope CLI - Bank statement analysis
//!
//! Usage:
//!   billscope analyze --file statement.csv        Full analysis report
//!   billscope bills --file statement.csv          Discovered recurring bills
//!   billscope reconcile --file s.csv --bills b.csv Match known bills
//!   billscope summary --file statement.csv        Spending totals

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Analyze {
            file,
            bills,
            today,
            json,
        } => commands::cmd_analyze(
            cli.config.as_deref(),
            &file,
            bills.as_deref(),
            today.as_deref(),
            json,
        ),
        Commands::Bills { file, strict, json } => {
            commands::cmd_bills(cli.config.as_deref(), &file, strict, json)
        }
        Commands::Reconcile { file, bills, json } => {
            commands::cmd_reconcile(cli.config.as_deref(), &file, &bills, json)
        }
        Commands::Summary { file, json } => {
            commands::cmd_summary(cli.config.as_deref(), &file, json)
        }
    }
}
