//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Billscope - Analyze bank statements for recurring bills
#[derive(Parser)]
#[command(name = "billscope")]
#[command(about = "Bank statement analysis and bill tracking", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analysis config file (TOML); defaults apply when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full analysis: patterns, bills, reconciliation, spending
    Analyze {
        /// Statement CSV to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Known-bills CSV (date,description,category,amount)
        #[arg(short, long)]
        bills: Option<PathBuf>,

        /// Reference date for the paid/upcoming split (YYYY-MM-DD, default today)
        #[arg(long)]
        today: Option<String>,

        /// Emit the full report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// List recurring bills discovered in a statement
    Bills {
        /// Statement CSV to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Use the strict bill-detection preset instead of loose discovery
        #[arg(long)]
        strict: bool,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Match a known-bill schedule against a statement
    Reconcile {
        /// Statement CSV to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Known-bills CSV (date,description,category,amount)
        #[arg(short, long)]
        bills: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show spending totals for a statement
    Summary {
        /// Statement CSV to analyze
        #[arg(short, long)]
        file: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
