//! Spending reports
//!
//! Straight rollups of a statement: credit/debit totals, daily movement,
//! and per-category spend.

use std::collections::HashMap;

use crate::models::{
    CategoryTotal, DailyTotal, SpendingSummary, Transaction, TransactionKind,
};

/// Overall totals for one statement
///
/// Rows without an amount are excluded from every figure. Credit and debit
/// totals use absolute amounts; the net change is credits minus debits.
pub fn spending_summary(transactions: &[Transaction]) -> SpendingSummary {
    let mut summary = SpendingSummary::default();
    let mut largest_credit: Option<(f64, &Transaction)> = None;
    let mut largest_debit: Option<(f64, &Transaction)> = None;

    for tx in transactions {
        let Some(amount) = tx.amount else {
            continue;
        };
        let magnitude = amount.abs();
        summary.transaction_count += 1;

        match tx.kind {
            TransactionKind::Credit => {
                summary.total_credits += magnitude;
                if largest_credit.map(|(m, _)| magnitude > m).unwrap_or(true) {
                    largest_credit = Some((magnitude, tx));
                }
            }
            TransactionKind::Debit => {
                summary.total_debits += magnitude;
                if largest_debit.map(|(m, _)| magnitude > m).unwrap_or(true) {
                    largest_debit = Some((magnitude, tx));
                }
            }
        }
    }

    summary.net_change = summary.total_credits - summary.total_debits;
    if summary.transaction_count > 0 {
        summary.average_transaction =
            (summary.total_credits + summary.total_debits) / summary.transaction_count as f64;
    }
    summary.largest_credit = largest_credit.map(|(_, tx)| tx.clone());
    summary.largest_debit = largest_debit.map(|(_, tx)| tx.clone());
    summary
}

/// Credit/debit/net movement per calendar day, sorted by date ascending
pub fn daily_totals(transactions: &[Transaction]) -> Vec<DailyTotal> {
    let mut by_day: HashMap<chrono::NaiveDate, DailyTotal> = HashMap::new();

    for tx in transactions {
        let Some(amount) = tx.amount else {
            continue;
        };
        let entry = by_day.entry(tx.date).or_insert_with(|| DailyTotal {
            date: tx.date,
            credits: 0.0,
            debits: 0.0,
            net: 0.0,
        });
        match tx.kind {
            TransactionKind::Credit => entry.credits += amount.abs(),
            TransactionKind::Debit => entry.debits += amount.abs(),
        }
        entry.net = entry.credits - entry.debits;
    }

    let mut totals: Vec<DailyTotal> = by_day.into_values().collect();
    totals.sort_by_key(|t| t.date);
    totals
}

/// Absolute debit spend per category, largest first
///
/// Uncategorized debits roll up under "Uncategorized". Credits are income,
/// not spend, and are excluded.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut by_category: HashMap<String, CategoryTotal> = HashMap::new();

    for tx in transactions {
        if tx.kind != TransactionKind::Debit {
            continue;
        }
        let Some(amount) = tx.amount else {
            continue;
        };
        let category = tx
            .category
            .clone()
            .unwrap_or_else(|| "Uncategorized".to_string());
        let entry = by_category
            .entry(category.clone())
            .or_insert_with(|| CategoryTotal {
                category,
                total: 0.0,
                transaction_count: 0,
            });
        entry.total += amount.abs();
        entry.transaction_count += 1;
    }

    let mut totals: Vec<CategoryTotal> = by_category.into_values().collect();
    totals.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
    totals
}
