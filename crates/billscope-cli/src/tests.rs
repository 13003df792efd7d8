//! CLI command tests
//!
//! This module contains all tests for the CLI commands, driven through
//! tempfile fixtures on disk.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::commands::{self, truncate};

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn statement_fixture(dir: &TempDir) -> PathBuf {
    write_fixture(
        dir,
        "statement.csv",
        "Summary line,,\n\
         \n\
         Date,Description,Amount,Running Bal.\n\
         09/05/2024,NETFLIX.COM,-15.49,984.51\n\
         09/15/2024,ACME PROPERTY MGMT,-1200.00,-215.49\n\
         10/05/2024,NETFLIX.COM,-15.49,-230.98\n\
         10/15/2024,ACME PROPERTY MGMT,-1200.00,-1430.98\n\
         11/04/2024,NETFLIX.COM,-15.49,-1446.47\n\
         11/05/2024,CHASE CREDIT CARD 1 PAYMENT,-200.00,-1646.47\n\
         11/15/2024,ACME PROPERTY MGMT,-1200.00,-2846.47\n",
    )
}

fn bills_fixture(dir: &TempDir) -> PathBuf {
    write_fixture(
        dir,
        "bills.csv",
        "date,description,category,amount\n\
         11/2/2024,Chase Credit Card 1,Credit Cards,200.00\n\
         11/20/2024,Electric Co,Utilities,80.00\n",
    )
}

// ========== Shared Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a very long description here", 10), "a very ...");
}

#[test]
fn test_load_config_default_when_no_path() {
    let config = commands::load_config(None).unwrap();
    assert_eq!(config.classifier.min_occurrences, 2);
}

#[test]
fn test_load_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "billscope.toml", "preset = \"strict_bill_detection\"\n");
    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config.classifier.min_occurrences, 3);
}

#[test]
fn test_load_config_bad_preset_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "billscope.toml", "preset = \"medium\"\n");
    assert!(commands::load_config(Some(&path)).is_err());
}

#[test]
fn test_resolve_today() {
    let explicit = commands::resolve_today(Some("2024-11-10")).unwrap();
    assert_eq!(explicit.to_string(), "2024-11-10");
    assert!(commands::resolve_today(Some("11/10/2024")).is_err());
    assert!(commands::resolve_today(None).is_ok());
}

#[test]
fn test_load_statement_and_bills() {
    let dir = TempDir::new().unwrap();
    let statement = commands::load_statement(&statement_fixture(&dir)).unwrap();
    assert_eq!(statement.transactions.len(), 7);

    let bills = commands::load_bills(&bills_fixture(&dir)).unwrap();
    assert_eq!(bills.len(), 2);
    assert_eq!(bills[0].description, "Chase Credit Card 1");
}

// ========== Command Tests ==========

#[test]
fn test_cmd_analyze_full_run() {
    let dir = TempDir::new().unwrap();
    let statement = statement_fixture(&dir);
    let bills = bills_fixture(&dir);

    let result = commands::cmd_analyze(
        None,
        &statement,
        Some(&bills),
        Some("2024-11-10"),
        false,
    );
    assert!(result.is_ok());

    // JSON mode over the same inputs
    let result = commands::cmd_analyze(None, &statement, Some(&bills), Some("2024-11-10"), true);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_without_bills() {
    let dir = TempDir::new().unwrap();
    let statement = statement_fixture(&dir);
    let result = commands::cmd_analyze(None, &statement, None, Some("2024-11-10"), false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_missing_statement_errors() {
    let missing = PathBuf::from("/nonexistent/statement.csv");
    let result = commands::cmd_analyze(None, &missing, None, None, false);
    assert!(result.is_err());
}

#[test]
fn test_cmd_bills_loose_and_strict() {
    let dir = TempDir::new().unwrap();
    let statement = statement_fixture(&dir);

    assert!(commands::cmd_bills(None, &statement, false, false).is_ok());
    assert!(commands::cmd_bills(None, &statement, true, true).is_ok());
}

#[test]
fn test_cmd_reconcile() {
    let dir = TempDir::new().unwrap();
    let statement = statement_fixture(&dir);
    let bills = bills_fixture(&dir);

    assert!(commands::cmd_reconcile(None, &statement, &bills, false).is_ok());
    assert!(commands::cmd_reconcile(None, &statement, &bills, true).is_ok());
}

#[test]
fn test_cmd_summary() {
    let dir = TempDir::new().unwrap();
    let statement = statement_fixture(&dir);

    assert!(commands::cmd_summary(None, &statement, false).is_ok());
    assert!(commands::cmd_summary(None, &statement, true).is_ok());
}

#[test]
fn test_cmd_summary_with_category_config() {
    let dir = TempDir::new().unwrap();
    let statement = statement_fixture(&dir);
    let config = write_fixture(
        &dir,
        "billscope.toml",
        "[[categories]]\n\
         name = \"Streaming\"\n\
         pattern = \"NETFLIX\"\n\
         pattern_type = \"contains\"\n",
    );

    assert!(commands::cmd_summary(Some(&config), &statement, false).is_ok());
}
