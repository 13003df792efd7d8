//! Bill reconciliation
//!
//! Matches an expected bill schedule against actual statement history:
//! loose substring on the description, exact amount at cent precision, and
//! a calendar-month window around the due date.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{KnownBill, ReconciledBill, Transaction};
use crate::schedule;

/// Which transaction wins when several match one bill
///
/// Two payments of the same amount in the same month are a real case
/// (e.g. catching up on a missed bill), so the choice is explicit
/// configuration rather than an accident of input order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTieBreak {
    /// Smallest |payment date - due date|; equal distances fall back to the
    /// earlier list position
    #[default]
    ClosestToDue,
    /// First match in input order, for compatibility with sources that
    /// depend on it
    FirstInList,
}

/// Reconcile each known bill against the transaction history
///
/// An empty bill list yields an empty result, not an error. Transactions
/// with absent amounts never match.
pub fn reconcile_bills(
    bills: &[KnownBill],
    transactions: &[Transaction],
    tie_break: MatchTieBreak,
) -> Vec<ReconciledBill> {
    bills
        .iter()
        .map(|bill| reconcile_one(bill, transactions, tie_break))
        .collect()
}

fn reconcile_one(
    bill: &KnownBill,
    transactions: &[Transaction],
    tie_break: MatchTieBreak,
) -> ReconciledBill {
    let (month_start, month_end) = schedule::month_window(bill.due_date);
    let needle = bill.description.to_lowercase();
    let expected_cents = to_cents(bill.amount);

    let candidates = transactions.iter().enumerate().filter(|(_, tx)| {
        tx.date >= month_start
            && tx.date <= month_end
            && tx
                .amount
                .map(|a| to_cents(a.abs()) == expected_cents)
                .unwrap_or(false)
            && tx.description.to_lowercase().contains(&needle)
    });

    let matched = match tie_break {
        MatchTieBreak::FirstInList => candidates.map(|(_, tx)| tx).next(),
        MatchTieBreak::ClosestToDue => candidates
            .min_by_key(|(position, tx)| ((tx.date - bill.due_date).num_days().abs(), *position))
            .map(|(_, tx)| tx),
    };

    debug!(
        "Bill '{}' ({:.2} due {}): {}",
        bill.description,
        bill.amount,
        bill.due_date,
        matched
            .map(|tx| format!("paid {} ({})", tx.date, tx.description))
            .unwrap_or_else(|| "no match".to_string())
    );

    let actual_amount = matched.and_then(|tx| tx.amount).map(f64::abs);

    ReconciledBill {
        bill: bill.clone(),
        is_paid: matched.is_some(),
        actual_payment_date: matched.map(|tx| tx.date),
        difference: actual_amount.map(|a| a - bill.amount),
        actual_amount,
    }
}

/// Amount comparison happens at cent precision; float noise from parsing
/// must not break an exact-amount match
fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bill(description: &str, amount: f64, due: NaiveDate) -> KnownBill {
        KnownBill {
            due_date: due,
            description: description.to_string(),
            category: "Utilities".to_string(),
            amount,
        }
    }

    fn debit(d: NaiveDate, description: &str, amount: f64) -> Transaction {
        Transaction::new(d, description, -amount.abs(), TransactionKind::Debit)
    }

    #[test]
    fn test_substring_exact_amount_month_window_match() {
        // Bill due 11/2, payment posted 11/5 under a longer description
        let bills = [bill("Chase Credit Card 1", 200.0, date(2024, 11, 2))];
        let txs = [debit(
            date(2024, 11, 5),
            "CHASE CREDIT CARD 1 PAYMENT",
            200.0,
        )];

        let result = reconcile_bills(&bills, &txs, MatchTieBreak::default());
        assert_eq!(result.len(), 1);
        assert!(result[0].is_paid);
        assert_eq!(result[0].actual_payment_date, Some(date(2024, 11, 5)));
        assert_eq!(result[0].actual_amount, Some(200.0));
        assert_eq!(result[0].difference, Some(0.0));
    }

    #[test]
    fn test_substring_is_asymmetric() {
        // The transaction must contain the bill description, not vice versa
        let bills = [bill("Chase Credit Card 1 Payment Autopay", 200.0, date(2024, 11, 2))];
        let txs = [debit(date(2024, 11, 5), "CHASE CREDIT CARD 1", 200.0)];

        let result = reconcile_bills(&bills, &txs, MatchTieBreak::default());
        assert!(!result[0].is_paid);
    }

    #[test]
    fn test_amount_must_match_exactly() {
        let bills = [bill("Electric Co", 80.0, date(2024, 5, 10))];
        let txs = [debit(date(2024, 5, 10), "ELECTRIC CO BILL PAY", 80.01)];

        let result = reconcile_bills(&bills, &txs, MatchTieBreak::default());
        assert!(!result[0].is_paid);
        assert_eq!(result[0].actual_amount, None);
        assert_eq!(result[0].difference, None);
    }

    #[test]
    fn test_window_is_the_calendar_month_inclusive() {
        let bills = [bill("Water Dept", 45.5, date(2024, 4, 15))];

        let inside = [
            debit(date(2024, 4, 1), "WATER DEPT ACH", 45.5),
            debit(date(2024, 4, 30), "WATER DEPT ACH", 45.5),
        ];
        for tx in &inside {
            let result = reconcile_bills(&bills, std::slice::from_ref(tx), MatchTieBreak::default());
            assert!(result[0].is_paid);
        }

        let outside = [debit(date(2024, 3, 31), "WATER DEPT ACH", 45.5)];
        let result = reconcile_bills(&bills, &outside, MatchTieBreak::default());
        assert!(!result[0].is_paid);
    }

    #[test]
    fn test_closest_to_due_tie_break() {
        // Two identical payments in the month: the one nearer the due date wins
        let bills = [bill("Gym", 25.0, date(2024, 6, 20))];
        let txs = [
            debit(date(2024, 6, 2), "GYM MONTHLY", 25.0),
            debit(date(2024, 6, 18), "GYM MONTHLY", 25.0),
        ];

        let closest = reconcile_bills(&bills, &txs, MatchTieBreak::ClosestToDue);
        assert_eq!(closest[0].actual_payment_date, Some(date(2024, 6, 18)));

        let first = reconcile_bills(&bills, &txs, MatchTieBreak::FirstInList);
        assert_eq!(first[0].actual_payment_date, Some(date(2024, 6, 2)));
    }

    #[test]
    fn test_equal_distance_falls_back_to_list_position() {
        let bills = [bill("Gym", 25.0, date(2024, 6, 10))];
        let txs = [
            debit(date(2024, 6, 12), "GYM MONTHLY", 25.0),
            debit(date(2024, 6, 8), "GYM MONTHLY", 25.0),
        ];

        let result = reconcile_bills(&bills, &txs, MatchTieBreak::ClosestToDue);
        assert_eq!(result[0].actual_payment_date, Some(date(2024, 6, 12)));
    }

    #[test]
    fn test_absent_amount_never_matches() {
        let bills = [bill("Gym", 25.0, date(2024, 6, 10))];
        let mut tx = debit(date(2024, 6, 10), "GYM MONTHLY", 25.0);
        tx.amount = None;

        let result = reconcile_bills(&bills, &[tx], MatchTieBreak::default());
        assert!(!result[0].is_paid);
    }

    #[test]
    fn test_no_known_bills_yields_empty_result() {
        let txs = [debit(date(2024, 6, 10), "GYM MONTHLY", 25.0)];
        assert!(reconcile_bills(&[], &txs, MatchTieBreak::default()).is_empty());
    }
}
