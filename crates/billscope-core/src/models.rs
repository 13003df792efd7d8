//! Domain models for Billscope

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether money moved out of or into the account
///
/// Carried separately from the amount sign because statement exports record
/// both and they can disagree; bill detection trusts this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Credit,
    Debit,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            _ => Err(format!("Unknown transaction kind: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized statement transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Free-text merchant label as exported; not normalized
    pub description: String,
    /// Negative = money out. Absent when the statement row had no parseable
    /// amount; such rows are excluded from amount-dependent computations.
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Informational only; never used by analysis
    pub running_balance: Option<f64>,
    /// Filled by the category matcher
    pub category: Option<String>,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: &str, amount: f64, kind: TransactionKind) -> Self {
        Self {
            date,
            description: description.to_string(),
            amount: Some(amount),
            kind,
            running_balance: None,
            category: None,
        }
    }
}

/// Billing cadence of a recurring charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Annual,
    /// Recurs, but the mean interval matches no known band
    Variable,
}

impl Cadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
            Self::Variable => "variable",
        }
    }

    /// Factor converting one billed amount into a monthly-equivalent cost.
    /// Variable cadences have no defined factor.
    pub fn monthly_multiplier(&self) -> Option<f64> {
        match self {
            Self::Weekly => Some(52.0 / 12.0),
            Self::Biweekly => Some(26.0 / 12.0),
            Self::Monthly => Some(1.0),
            Self::Quarterly => Some(1.0 / 3.0),
            Self::Annual => Some(1.0 / 12.0),
            Self::Variable => None,
        }
    }
}

impl std::str::FromStr for Cadence {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" | "bi-weekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annual" | "yearly" => Ok(Self::Annual),
            "variable" => Ok(Self::Variable),
            _ => Err(format!("Unknown cadence: {}", s)),
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a category rule pattern is applied to a description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// Case-insensitive substring; supports pipe-separated alternatives
    Contains,
    Regex,
    Exact,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Regex => "regex",
            Self::Exact => "exact",
        }
    }
}

impl std::str::FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contains" => Ok(Self::Contains),
            "regex" => Ok(Self::Regex),
            "exact" => Ok(Self::Exact),
            _ => Err(format!("Unknown pattern type: {}", s)),
        }
    }
}

/// Inclusive bounds on a transaction's absolute amount
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AmountRange {
    pub fn contains(&self, amount: f64) -> bool {
        if let Some(min) = self.min {
            if amount < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if amount > max {
                return false;
            }
        }
        true
    }
}

/// A rule assigning a category to matching transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category name assigned on match
    pub name: String,
    pub pattern: String,
    pub pattern_type: PatternType,
    /// Additional gate on the absolute amount, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_range: Option<AmountRange>,
}

/// An expected bill from an external source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownBill {
    pub due_date: NaiveDate,
    pub description: String,
    pub category: String,
    /// Expected absolute amount
    pub amount: f64,
}

/// A recurring bill inferred from transaction history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredBill {
    pub description: String,
    /// Typical absolute amount; absent when no member carried an amount
    pub amount: Option<f64>,
    pub cadence: Cadence,
    /// Interval regularity in [0,1]
    pub confidence: f64,
    /// Rounded mean day-of-month across occurrences
    pub typical_day: u32,
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
    /// Absent when the cadence gives no prediction
    pub next_due: Option<NaiveDate>,
    pub occurrences: usize,
}

/// A known bill with its reconciliation status against the statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciledBill {
    pub bill: KnownBill,
    pub is_paid: bool,
    pub actual_payment_date: Option<NaiveDate>,
    /// Absolute amount of the matched transaction
    pub actual_amount: Option<f64>,
    /// Actual minus expected; absent when unpaid (display treats it as 0)
    pub difference: Option<f64>,
}

/// One analyzed merchant cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurrencePattern {
    /// Grouping key the cluster formed under
    pub key: String,
    pub description: String,
    /// Debit members counted toward the occurrence minimum
    pub occurrences: usize,
    /// Mean day gap between consecutive occurrences; absent below 2 dates
    pub mean_interval: Option<f64>,
    pub interval_std_dev: Option<f64>,
    /// Mean absolute amount over members that carry one
    pub typical_amount: Option<f64>,
    pub amount_std_dev: Option<f64>,
    /// 1 - stddev/mean of intervals, clamped to [0,1]; absent when undefined
    pub confidence: Option<f64>,
    /// Band the mean interval landed in; absent when no interval stats exist
    pub cadence: Option<Cadence>,
    pub typical_day: Option<u32>,
    pub first_seen: NaiveDate,
    pub last_seen: NaiveDate,
    /// Whether the cluster passed every recurrence gate of the active config
    pub is_recurring: bool,
    /// Debit members, date-ascending
    pub transactions: Vec<Transaction>,
}

/// Spending totals over one statement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpendingSummary {
    /// Sum of credit amounts
    pub total_credits: f64,
    /// Sum of absolute debit amounts
    pub total_debits: f64,
    /// Credits minus debits
    pub net_change: f64,
    /// Rows carrying an amount
    pub transaction_count: usize,
    /// Mean absolute amount across counted rows
    pub average_transaction: f64,
    pub largest_credit: Option<Transaction>,
    pub largest_debit: Option<Transaction>,
}

/// Credit/debit movement for a single day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub credits: f64,
    pub debits: f64,
    /// Credits minus debits for the day
    pub net: f64,
}

/// Total absolute debit spend for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub transaction_count: usize,
}
