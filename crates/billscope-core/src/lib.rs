//! Billscope Core Library
//!
//! Statement analysis for the Billscope toolkit:
//! - Bank statement CSV import
//! - Interval statistics over transaction clusters
//! - Configurable recurrence classification and bill discovery
//! - Due-date prediction
//! - Reconciliation of known bill schedules against statement history
//! - Paid/upcoming aggregation and spending reports
//!
//! Everything is synchronous and pure: each analysis recomputes from an
//! immutable snapshot of the transaction list.

pub mod aggregate;
pub mod analysis;
pub mod categorize;
pub mod classify;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod reconcile;
pub mod report;
pub mod schedule;
pub mod source;
pub mod stats;

pub use aggregate::BillOutlook;
pub use analysis::{AnalysisReport, Analyzer};
pub use classify::{ClassifierConfig, GroupingStrategy, RecurrenceClassifier};
pub use config::{AnalysisConfig, AnalysisConfigFile};
pub use error::{Error, Result};
pub use import::ImportResult;
pub use models::{
    Cadence, CategoryRule, DiscoveredBill, KnownBill, PatternType, ReconciledBill,
    RecurrencePattern, Transaction, TransactionKind,
};
pub use reconcile::MatchTieBreak;
pub use source::{BillSource, CsvBillSource, StaticBillSource};
