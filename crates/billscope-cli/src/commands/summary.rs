//! Spending summary command

use std::path::Path;

use anyhow::Result;
use billscope_core::categorize::categorize_transactions;
use billscope_core::report;

use super::{load_config, load_statement, truncate};

pub fn cmd_summary(config: Option<&Path>, file: &Path, json: bool) -> Result<()> {
    let config = load_config(config)?;
    let mut statement = load_statement(file)?;
    categorize_transactions(&mut statement.transactions, &config.category_rules)?;

    let summary = report::spending_summary(&statement.transactions);
    let categories = report::category_totals(&statement.transactions);

    if json {
        let payload = serde_json::json!({
            "summary": summary,
            "categories": categories,
            "rows_skipped": statement.rows_skipped,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!();
    println!("💰 Spending Summary ({})", file.display());
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Transactions:  {}", summary.transaction_count);
    println!("   Credits:       ${:.2}", summary.total_credits);
    println!("   Debits:        ${:.2}", summary.total_debits);
    println!("   Net change:    ${:.2}", summary.net_change);
    println!("   Average:       ${:.2}", summary.average_transaction);

    if let Some(tx) = &summary.largest_debit {
        println!(
            "   Largest debit: ${:.2} ({} on {})",
            tx.amount.unwrap_or(0.0).abs(),
            truncate(&tx.description, 30),
            tx.date
        );
    }
    if statement.rows_skipped > 0 {
        println!("   ({} rows skipped during import)", statement.rows_skipped);
    }

    if !categories.is_empty() {
        println!();
        println!("   By category:");
        for cat in &categories {
            println!(
                "   {:20} │ {:>10} │ {} transactions",
                truncate(&cat.category, 20),
                format!("${:.2}", cat.total),
                cat.transaction_count
            );
        }
    }

    Ok(())
}
