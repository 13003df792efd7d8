//! Category assignment
//!
//! Applies an ordered list of category rules to transactions. Rules run in
//! list order and the first match wins.

use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::models::{CategoryRule, PatternType, Transaction};

/// Fill `category` on every transaction the rules match
///
/// Returns the number of transactions that received a category. Already
/// assigned categories are overwritten; each analysis recomputes from
/// scratch.
pub fn categorize_transactions(
    transactions: &mut [Transaction],
    rules: &[CategoryRule],
) -> Result<usize> {
    let mut assigned = 0;
    for tx in transactions.iter_mut() {
        tx.category = match_category(tx, rules)?;
        if tx.category.is_some() {
            assigned += 1;
        }
    }
    debug!(
        "Categorized {}/{} transactions with {} rules",
        assigned,
        transactions.len(),
        rules.len()
    );
    Ok(assigned)
}

/// First rule matching the transaction, in list order
pub fn match_category(tx: &Transaction, rules: &[CategoryRule]) -> Result<Option<String>> {
    for rule in rules {
        if !pattern_matches(&tx.description, &rule.pattern, rule.pattern_type)? {
            continue;
        }
        if let Some(range) = &rule.amount_range {
            // A rule gated on amount cannot match a transaction without one
            match tx.amount {
                Some(amount) if range.contains(amount.abs()) => {}
                _ => continue,
            }
        }
        return Ok(Some(rule.name.clone()));
    }
    Ok(None)
}

/// Check if a description matches a pattern
fn pattern_matches(description: &str, pattern: &str, pattern_type: PatternType) -> Result<bool> {
    let desc_upper = description.to_uppercase();

    match pattern_type {
        PatternType::Contains => {
            // Support pipe-separated OR patterns
            for p in pattern.split('|') {
                if desc_upper.contains(&p.to_uppercase()) {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        PatternType::Regex => {
            let re = Regex::new(pattern)?;
            Ok(re.is_match(description) || re.is_match(&desc_upper))
        }
        PatternType::Exact => Ok(desc_upper == pattern.to_uppercase()),
    }
}
