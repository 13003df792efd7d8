//! Known-bill sources
//!
//! The reconciler consumes an externally supplied bill schedule. Sources
//! are pluggable behind a trait; each source carries its full configuration
//! at construction and reads nothing from the ambient environment.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::Result;
use crate::import::parse_date;
use crate::models::KnownBill;

/// Provider of an expected-bill schedule
pub trait BillSource {
    fn fetch_bills(&self) -> Result<Vec<KnownBill>>;
}

/// Bill schedule backed by a CSV file
///
/// Columns: `date, description, category, amount`. Malformed rows are
/// skipped with a warning; a missing file is an error.
pub struct CsvBillSource {
    path: PathBuf,
}

impl CsvBillSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BillSource for CsvBillSource {
    fn fetch_bills(&self) -> Result<Vec<KnownBill>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut bills = Vec::new();
        let mut skipped = 0;

        for result in rdr.records() {
            let record = result?;

            let date_str = record.get(0).unwrap_or("").trim();
            let description = record.get(1).unwrap_or("").trim();
            let category = record.get(2).unwrap_or("").trim();
            let amount_str = record.get(3).unwrap_or("").trim();

            let (due_date, amount) = match (parse_date(date_str), amount_str.parse::<f64>()) {
                (Ok(d), Ok(a)) if !description.is_empty() => (d, a),
                _ => {
                    warn!(
                        "Skipping malformed bill row: date={:?} description={:?} amount={:?}",
                        date_str, description, amount_str
                    );
                    skipped += 1;
                    continue;
                }
            };

            bills.push(KnownBill {
                due_date,
                description: description.to_string(),
                category: category.to_string(),
                amount: amount.abs(),
            });
        }

        debug!(
            "Loaded {} bills from {} ({} rows skipped)",
            bills.len(),
            self.path.display(),
            skipped
        );
        Ok(bills)
    }
}

/// In-memory bill list, mainly for tests and embedding callers
pub struct StaticBillSource {
    bills: Vec<KnownBill>,
}

impl StaticBillSource {
    pub fn new(bills: Vec<KnownBill>) -> Self {
        Self { bills }
    }
}

impl BillSource for StaticBillSource {
    fn fetch_bills(&self) -> Result<Vec<KnownBill>> {
        Ok(self.bills.clone())
    }
}
