//! Discovered-bills command

use std::path::Path;

use anyhow::Result;
use billscope_core::{ClassifierConfig, RecurrenceClassifier};

use super::{load_config, load_statement, truncate};

pub fn cmd_bills(config: Option<&Path>, file: &Path, strict: bool, json: bool) -> Result<()> {
    let mut config = load_config(config)?;
    if strict {
        config.classifier = ClassifierConfig::strict_bill_detection();
    }

    let statement = load_statement(file)?;
    let classifier = RecurrenceClassifier::new(config.classifier);
    let bills = classifier.discover_bills(&statement.transactions);

    if json {
        println!("{}", serde_json::to_string_pretty(&bills)?);
        return Ok(());
    }

    if bills.is_empty() {
        println!("No recurring bills detected in {}.", file.display());
        println!("Try the loose preset (omit --strict) or a longer statement.");
        return Ok(());
    }

    println!();
    println!("📋 Recurring Bills ({})", file.display());
    println!("   ─────────────────────────────────────────────────────────────");

    for bill in &bills {
        let amount_str = bill
            .amount
            .map(|a| format!("${:.2}", a))
            .unwrap_or_else(|| "?".to_string());
        let next_due = bill
            .next_due
            .map(|d| d.to_string())
            .unwrap_or_else(|| "cannot predict".to_string());

        println!(
            "   {:30} │ {:>9}/{:<9} │ next due {} ({:.0}% confidence)",
            truncate(&bill.description, 30),
            amount_str,
            bill.cadence.as_str(),
            next_due,
            bill.confidence * 100.0
        );
    }

    Ok(())
}
