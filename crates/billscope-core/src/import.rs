//! Statement CSV import
//!
//! Bank statement exports open with a summary preamble before the actual
//! transaction table. The parser locates the transaction header line and
//! reads `Date, Description, Amount, Running Bal.` rows from there.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionKind};

/// Parsed statement plus a count of rows the parser had to drop
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub transactions: Vec<Transaction>,
    /// Rows skipped for unparseable dates or balance-summary content
    pub rows_skipped: usize,
}

/// Parse a statement export from a file path
pub fn parse_statement_file(path: &Path) -> Result<ImportResult> {
    let file = File::open(path)?;
    parse_statement(file)
}

/// Parse a statement export
///
/// Malformed rows are dropped and counted, never fatal: an unparseable
/// date skips the row, a non-numeric amount keeps the row with an absent
/// amount. The whole import fails only when no transaction header exists.
pub fn parse_statement<R: Read>(mut reader: R) -> Result<ImportResult> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    // Skip the summary preamble by fingerprinting the header line
    let header_offset = text
        .lines()
        .position(|line| line.trim_start().starts_with("Date,Description,Amount"))
        .ok_or_else(|| {
            Error::Import("cannot find transaction header (Date,Description,Amount)".into())
        })?;
    let table: String = text
        .lines()
        .skip(header_offset)
        .collect::<Vec<_>>()
        .join("\n");

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(table.as_bytes());

    let mut transactions = Vec::new();
    let mut rows_skipped = 0;

    for result in rdr.records() {
        let record = result?;

        let date_str = record.get(0).unwrap_or("").trim();
        let description = record.get(1).unwrap_or("").trim();

        // Statement exports interleave balance summary rows with the table
        if date_str.is_empty() || description.to_lowercase().contains("beginning balance") {
            rows_skipped += 1;
            continue;
        }

        let date = match parse_date(date_str) {
            Ok(d) => d,
            Err(_) => {
                debug!("Skipping row with unparseable date: {}", date_str);
                rows_skipped += 1;
                continue;
            }
        };

        let amount_str = clean_amount(record.get(2).unwrap_or(""));
        let kind = if amount_str.starts_with('-') {
            TransactionKind::Debit
        } else {
            TransactionKind::Credit
        };
        let amount = amount_str.parse::<f64>().ok();

        let running_balance = clean_amount(record.get(3).unwrap_or(""))
            .parse::<f64>()
            .ok();

        transactions.push(Transaction {
            date,
            description: description.to_string(),
            amount,
            kind,
            running_balance,
            category: None,
        });
    }

    debug!(
        "Parsed {} transactions ({} rows skipped)",
        transactions.len(),
        rows_skipped
    );

    Ok(ImportResult {
        transactions,
        rows_skipped,
    })
}

/// Parse a statement date, trying US and ISO formats
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(Error::DateParse)
}

/// Strip currency decoration ($ signs, thousands commas, quotes)
fn clean_amount(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '"'))
        .collect()
}
