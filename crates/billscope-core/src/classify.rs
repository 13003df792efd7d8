//! Recurrence classification
//!
//! Groups statement transactions into merchant clusters and decides which
//! clusters represent recurring bills, at what cadence, and with what
//! confidence. One configurable classifier covers both the loose discovery
//! pass and the strict bill-detection pass.

use std::collections::HashMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Cadence, DiscoveredBill, RecurrencePattern, Transaction, TransactionKind};
use crate::{schedule, stats};

/// How transactions are keyed into clusters
///
/// Both strategies are exact-match on the derived key, never fuzzy. They
/// answer different questions: same merchant regardless of amount, or the
/// same recurring charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingStrategy {
    /// Trimmed description alone
    Description,
    /// Absolute amount at cent precision plus trimmed description
    AmountAndDescription,
}

/// Classifier thresholds
///
/// Collapses the legacy loose/strict analyzer pair into one parameter set.
/// Use the named presets unless a knob genuinely needs overriding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub grouping: GroupingStrategy,
    /// Minimum debit occurrences before a cluster is considered at all
    pub min_occurrences: usize,
    /// Minimum interval confidence for a cluster to count as recurring
    pub min_confidence: f64,
    /// When set, amount stddev must stay below this fraction of the mean
    /// amount (e.g. 0.10 = 10%)
    pub max_amount_variance: Option<f64>,
    /// Inclusive mean-interval band classified as monthly, in days.
    /// One band per classifier instance, never mixed.
    pub monthly_band: (f64, f64),
}

impl ClassifierConfig {
    /// Loose discovery: surface anything that plausibly repeats
    pub fn loose_discovery() -> Self {
        Self {
            grouping: GroupingStrategy::Description,
            min_occurrences: 2,
            min_confidence: 0.5,
            max_amount_variance: None,
            monthly_band: (25.0, 35.0),
        }
    }

    /// Strict bill detection: high-confidence recurring charges only
    pub fn strict_bill_detection() -> Self {
        Self {
            grouping: GroupingStrategy::Description,
            min_occurrences: 3,
            min_confidence: 0.5,
            max_amount_variance: Some(0.10),
            monthly_band: (28.0, 31.0),
        }
    }

    /// Reject configurations no classification can be computed under
    pub fn validate(&self) -> Result<()> {
        if self.min_occurrences < 2 {
            return Err(Error::InvalidConfig(format!(
                "min_occurrences must be at least 2, got {}",
                self.min_occurrences
            )));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(Error::InvalidConfig(format!(
                "min_confidence must be in [0,1], got {}",
                self.min_confidence
            )));
        }
        if let Some(variance) = self.max_amount_variance {
            if variance <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "max_amount_variance must be positive, got {}",
                    variance
                )));
            }
        }
        let (lo, hi) = self.monthly_band;
        if lo <= 0.0 || hi < lo {
            return Err(Error::InvalidConfig(format!(
                "monthly_band must be a positive inclusive range, got [{}, {}]",
                lo, hi
            )));
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::loose_discovery()
    }
}

/// Recurrence classifier over one transaction snapshot
pub struct RecurrenceClassifier {
    config: ClassifierConfig,
}

impl RecurrenceClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Cluster transactions and compute recurrence statistics per cluster
    ///
    /// Clusters form under the configured grouping key in first-seen key
    /// order. Only debit members count: credits never contribute to bill
    /// detection, independent of amount sign. Clusters below the occurrence
    /// minimum are dropped. Output is ordered by descending occurrence
    /// count; ties keep first-seen key order.
    pub fn analyze_patterns(&self, transactions: &[Transaction]) -> Vec<RecurrencePattern> {
        let mut key_order: Vec<String> = Vec::new();
        let mut clusters: HashMap<String, Vec<&Transaction>> = HashMap::new();

        for tx in transactions {
            let key = self.grouping_key(tx);
            if !clusters.contains_key(&key) {
                key_order.push(key.clone());
            }
            clusters.entry(key).or_default().push(tx);
        }

        let mut patterns = Vec::new();

        for key in &key_order {
            let members = &clusters[key];
            let mut debits: Vec<&Transaction> = members
                .iter()
                .copied()
                .filter(|t| t.kind == TransactionKind::Debit)
                .collect();

            if debits.len() < self.config.min_occurrences {
                continue;
            }
            debits.sort_by_key(|t| t.date);

            if let Some(pattern) = self.analyze_cluster(key, &debits) {
                patterns.push(pattern);
            }
        }

        // Stable sort keeps first-seen key order among equal counts
        patterns.sort_by(|a, b| b.occurrences.cmp(&a.occurrences));
        patterns
    }

    /// Map recurring patterns to discovered bills with predicted due dates
    ///
    /// A variable cadence yields a bill with no next-due date; downstream
    /// display treats that as "cannot predict", never as an error.
    pub fn discover_bills(&self, transactions: &[Transaction]) -> Vec<DiscoveredBill> {
        self.analyze_patterns(transactions)
            .into_iter()
            .filter(|p| p.is_recurring)
            .filter_map(|p| {
                let cadence = p.cadence?;
                let confidence = p.confidence?;
                let typical_day = p.typical_day?;
                Some(DiscoveredBill {
                    next_due: schedule::next_due_date(p.last_seen, cadence, typical_day),
                    description: p.description,
                    amount: p.typical_amount,
                    cadence,
                    confidence,
                    typical_day,
                    first_seen: p.first_seen,
                    last_seen: p.last_seen,
                    occurrences: p.occurrences,
                })
            })
            .collect()
    }

    /// Statistics and recurrence verdict for one date-sorted debit cluster
    fn analyze_cluster(&self, key: &str, debits: &[&Transaction]) -> Option<RecurrencePattern> {
        let first = debits.first()?;
        let last = debits.last()?;

        let dates: Vec<_> = debits.iter().map(|t| t.date).collect();
        let intervals = stats::day_intervals(&dates);
        let interval_values: Vec<f64> = intervals.iter().map(|&i| i as f64).collect();
        let mean_interval = stats::mean(&interval_values);
        let interval_std_dev = stats::population_std_dev(&interval_values);
        let confidence = stats::interval_confidence(&intervals);

        let amounts: Vec<f64> = debits
            .iter()
            .filter_map(|t| t.amount)
            .map(f64::abs)
            .collect();
        let typical_amount = stats::mean(&amounts);
        let amount_std_dev = stats::population_std_dev(&amounts);

        let cadence = mean_interval.map(|m| self.classify_interval(m));

        let days: Vec<f64> = debits.iter().map(|t| t.date.day() as f64).collect();
        let typical_day = stats::mean(&days).map(|d| d.round() as u32);

        let passes_confidence = confidence
            .map(|c| c >= self.config.min_confidence)
            .unwrap_or(false);
        let passes_variance = match self.config.max_amount_variance {
            None => true,
            Some(limit) => match (amount_std_dev, typical_amount) {
                (Some(sd), Some(avg)) if avg > 0.0 => sd < limit * avg,
                _ => false,
            },
        };
        let is_recurring = passes_confidence && passes_variance;

        debug!(
            "Cluster {}: {} debits, mean interval {:?}, confidence {:?}, cadence {:?}, recurring={}",
            key,
            debits.len(),
            mean_interval,
            confidence,
            cadence,
            is_recurring
        );

        Some(RecurrencePattern {
            key: key.to_string(),
            description: first.description.trim().to_string(),
            occurrences: debits.len(),
            mean_interval,
            interval_std_dev,
            typical_amount,
            amount_std_dev,
            confidence,
            cadence,
            typical_day,
            first_seen: first.date,
            last_seen: last.date,
            is_recurring,
            transactions: debits.iter().map(|&t| t.clone()).collect(),
        })
    }

    /// Match a mean interval against the cadence bands, all inclusive
    fn classify_interval(&self, mean_interval: f64) -> Cadence {
        let (monthly_lo, monthly_hi) = self.config.monthly_band;
        if (6.0..=8.0).contains(&mean_interval) {
            Cadence::Weekly
        } else if (13.0..=15.0).contains(&mean_interval) {
            Cadence::Biweekly
        } else if mean_interval >= monthly_lo && mean_interval <= monthly_hi {
            Cadence::Monthly
        } else if (85.0..=95.0).contains(&mean_interval) {
            Cadence::Quarterly
        } else if (350.0..=380.0).contains(&mean_interval) {
            Cadence::Annual
        } else {
            Cadence::Variable
        }
    }

    fn grouping_key(&self, tx: &Transaction) -> String {
        let description = tx.description.trim();
        match self.config.grouping {
            GroupingStrategy::Description => description.to_string(),
            // An absent amount contributes 0.00, matching the legacy key format
            GroupingStrategy::AmountAndDescription => {
                format!("{:.2}_{}", tx.amount.unwrap_or(0.0).abs(), description)
            }
        }
    }
}
