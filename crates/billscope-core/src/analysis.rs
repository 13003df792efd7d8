//! Analysis facade
//!
//! The single call boundary over one transaction snapshot: categorize,
//! classify, discover, reconcile, aggregate, report. Returns a complete
//! `AnalysisReport` or a single tagged error, never a half-populated
//! result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{self, BillOutlook};
use crate::categorize;
use crate::classify::RecurrenceClassifier;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{
    CategoryTotal, DailyTotal, DiscoveredBill, KnownBill, ReconciledBill, RecurrencePattern,
    SpendingSummary, Transaction,
};
use crate::reconcile;
use crate::report;

/// Everything one analysis run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// All merchant clusters that met the occurrence minimum
    pub patterns: Vec<RecurrencePattern>,
    /// Recurring patterns promoted to bills with predicted due dates
    pub discovered_bills: Vec<DiscoveredBill>,
    /// Known bills matched against the statement; empty when no bill list
    /// was supplied
    pub reconciled_bills: Vec<ReconciledBill>,
    pub outlook: BillOutlook,
    pub summary: SpendingSummary,
    pub daily_totals: Vec<DailyTotal>,
    pub category_totals: Vec<CategoryTotal>,
}

/// Runs the full pipeline under one resolved configuration
///
/// Holds no state between calls: every analysis recomputes from the input
/// snapshot, so independent invocations are safe to run in parallel.
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Build an analyzer, rejecting invalid configuration up front
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.classifier.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full analysis over one snapshot
    ///
    /// `known_bills` may be empty; reconciliation then degrades to an empty
    /// result. `today` is explicit so callers (and tests) control the
    /// paid/upcoming boundary.
    pub fn analyze(
        &self,
        transactions: &[Transaction],
        known_bills: &[KnownBill],
        today: NaiveDate,
    ) -> Result<AnalysisReport> {
        let mut transactions = transactions.to_vec();
        categorize::categorize_transactions(&mut transactions, &self.config.category_rules)?;

        let classifier = RecurrenceClassifier::new(self.config.classifier.clone());
        let patterns = classifier.analyze_patterns(&transactions);
        let discovered_bills = classifier.discover_bills(&transactions);

        let reconciled_bills =
            reconcile::reconcile_bills(known_bills, &transactions, self.config.tie_break);

        let outlook = aggregate::bill_outlook(&discovered_bills, today);

        let summary = report::spending_summary(&transactions);
        let daily_totals = report::daily_totals(&transactions);
        let category_totals = report::category_totals(&transactions);

        info!(
            "Analysis complete: {} transactions, {} clusters, {} recurring bills, {}/{} known bills paid",
            transactions.len(),
            patterns.len(),
            discovered_bills.len(),
            reconciled_bills.iter().filter(|b| b.is_paid).count(),
            reconciled_bills.len()
        );

        Ok(AnalysisReport {
            patterns,
            discovered_bills,
            reconciled_bills,
            outlook,
            summary,
            daily_totals,
            category_totals,
        })
    }
}
