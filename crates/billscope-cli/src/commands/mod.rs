//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `analyze` - Full analysis report over one statement
//! - `bills` - Discovered recurring bills
//! - `reconcile` - Known-bill schedule matching
//! - `summary` - Spending totals

pub mod analyze;
pub mod bills;
pub mod reconcile;
pub mod summary;

// Re-export command functions for main.rs
pub use analyze::*;
pub use bills::*;
pub use reconcile::*;
pub use summary::*;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

use billscope_core::{
    config::AnalysisConfig,
    import::{parse_statement_file, ImportResult},
    models::KnownBill,
    source::{BillSource, CsvBillSource},
};

/// Resolve the analysis configuration from an optional --config path
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => AnalysisConfig::from_file(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Parse a statement CSV from disk
pub fn load_statement(path: &Path) -> Result<ImportResult> {
    let result = parse_statement_file(path)
        .with_context(|| format!("Failed to parse statement {}", path.display()))?;
    tracing::debug!(
        "Loaded {} transactions from {} ({} rows skipped)",
        result.transactions.len(),
        path.display(),
        result.rows_skipped
    );
    Ok(result)
}

/// Load a known-bills CSV from disk
pub fn load_bills(path: &Path) -> Result<Vec<KnownBill>> {
    CsvBillSource::new(path)
        .fetch_bills()
        .with_context(|| format!("Failed to load bills {}", path.display()))
}

/// Resolve the reference date for the paid/upcoming split
pub fn resolve_today(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --today format (use YYYY-MM-DD)"),
        None => Ok(Utc::now().date_naive()),
    }
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
