//! Reconciliation command

use std::path::Path;

use anyhow::Result;
use billscope_core::reconcile::reconcile_bills;

use super::{load_bills, load_config, load_statement, truncate};

pub fn cmd_reconcile(
    config: Option<&Path>,
    file: &Path,
    bills_path: &Path,
    json: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let statement = load_statement(file)?;
    let bills = load_bills(bills_path)?;

    let reconciled = reconcile_bills(&bills, &statement.transactions, config.tie_break);

    if json {
        println!("{}", serde_json::to_string_pretty(&reconciled)?);
        return Ok(());
    }

    if reconciled.is_empty() {
        println!("No bills listed in {}.", bills_path.display());
        return Ok(());
    }

    let paid = reconciled.iter().filter(|b| b.is_paid).count();

    println!();
    println!("🧾 Bill Reconciliation ({}/{} paid)", paid, reconciled.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for entry in &reconciled {
        let status = if entry.is_paid { "✅" } else { "⏳" };
        let paid_on = entry
            .actual_payment_date
            .map(|d| format!("paid {}", d))
            .unwrap_or_else(|| "pending".to_string());
        // Unmatched bills have no difference; display it as 0
        let difference = entry.difference.unwrap_or(0.0);

        println!(
            "   {} {:25} │ {:>9} due {} │ {} (diff ${:.2})",
            status,
            truncate(&entry.bill.description, 25),
            format!("${:.2}", entry.bill.amount),
            entry.bill.due_date,
            paid_on,
            difference
        );
    }

    Ok(())
}
