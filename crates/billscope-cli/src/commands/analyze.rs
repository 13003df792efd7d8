//! Full analysis command

use std::path::Path;

use anyhow::Result;
use billscope_core::Analyzer;

use super::{load_bills, load_config, load_statement, resolve_today, truncate};

pub fn cmd_analyze(
    config: Option<&Path>,
    file: &Path,
    bills: Option<&Path>,
    today: Option<&str>,
    json: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let statement = load_statement(file)?;
    let known_bills = match bills {
        Some(path) => load_bills(path)?,
        None => Vec::new(),
    };
    let today = resolve_today(today)?;

    let analyzer = Analyzer::new(config)?;
    let report = analyzer.analyze(&statement.transactions, &known_bills, today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("🔍 Statement Analysis ({})", file.display());
    println!(
        "   {} transactions, {} rows skipped",
        statement.transactions.len(),
        statement.rows_skipped
    );

    println!();
    println!(
        "📋 Recurring Bills — ${:.2}/month equivalent",
        report.outlook.monthly_total
    );
    println!("   ─────────────────────────────────────────────────────────────");
    if report.discovered_bills.is_empty() {
        println!("   none detected");
    }
    for bill in &report.discovered_bills {
        let amount_str = bill
            .amount
            .map(|a| format!("${:.2}", a))
            .unwrap_or_else(|| "?".to_string());
        let next_due = bill
            .next_due
            .map(|d| d.to_string())
            .unwrap_or_else(|| "cannot predict".to_string());
        println!(
            "   {:28} │ {:>9}/{:<9} │ next due {}",
            truncate(&bill.description, 28),
            amount_str,
            bill.cadence.as_str(),
            next_due
        );
    }
    println!(
        "   {} past due date, {} upcoming, {} unscheduled (as of {})",
        report.outlook.paid.len(),
        report.outlook.upcoming.len(),
        report.outlook.unscheduled.len(),
        today
    );

    if !report.reconciled_bills.is_empty() {
        let paid = report.reconciled_bills.iter().filter(|b| b.is_paid).count();
        println!();
        println!(
            "🧾 Known Bills ({}/{} paid)",
            paid,
            report.reconciled_bills.len()
        );
        println!("   ─────────────────────────────────────────────────────────────");
        for entry in &report.reconciled_bills {
            let status = if entry.is_paid { "✅" } else { "⏳" };
            let paid_on = entry
                .actual_payment_date
                .map(|d| format!("paid {}", d))
                .unwrap_or_else(|| "pending".to_string());
            println!(
                "   {} {:25} │ {:>9} due {} │ {}",
                status,
                truncate(&entry.bill.description, 25),
                format!("${:.2}", entry.bill.amount),
                entry.bill.due_date,
                paid_on
            );
        }
    }

    println!();
    println!(
        "💰 Spending: ${:.2} in, ${:.2} out, net ${:.2}",
        report.summary.total_credits,
        report.summary.total_debits,
        report.summary.net_change
    );

    Ok(())
}
