//! Bill aggregation
//!
//! Rolls discovered bills into paid/upcoming partitions and a normalized
//! monthly-equivalent cost.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::DiscoveredBill;

/// Discovered bills partitioned by their predicted due date
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillOutlook {
    /// Next due date strictly before today. A proxy for payment status,
    /// not a true payment check.
    pub paid: Vec<DiscoveredBill>,
    /// Next due date today or later
    pub upcoming: Vec<DiscoveredBill>,
    /// No computable next due date; never silently defaults into either
    /// partition above
    pub unscheduled: Vec<DiscoveredBill>,
    /// Monthly-equivalent cost across all bills with a defined cadence
    /// multiplier and a known amount
    pub monthly_total: f64,
}

/// Partition bills against `today` and total their monthly-equivalent cost
pub fn bill_outlook(bills: &[DiscoveredBill], today: NaiveDate) -> BillOutlook {
    let mut outlook = BillOutlook {
        monthly_total: monthly_equivalent_total(bills),
        ..Default::default()
    };

    for bill in bills {
        match bill.next_due {
            Some(due) if due < today => outlook.paid.push(bill.clone()),
            Some(_) => outlook.upcoming.push(bill.clone()),
            None => outlook.unscheduled.push(bill.clone()),
        }
    }

    outlook
}

/// Sum of amount x cadence multiplier over all bills
///
/// Bills with no defined multiplier (variable cadence) or no known amount
/// contribute nothing. The partition a bill landed in does not affect the
/// total.
pub fn monthly_equivalent_total(bills: &[DiscoveredBill]) -> f64 {
    bills
        .iter()
        .filter_map(|bill| {
            let amount = bill.amount?;
            let multiplier = bill.cadence.monthly_multiplier()?;
            Some(amount * multiplier)
        })
        .sum()
}
