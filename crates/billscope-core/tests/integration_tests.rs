//! Integration tests for billscope-core
//!
//! These tests exercise the full import → classify → reconcile → aggregate
//! workflow over statement fixtures.

use billscope_core::{
    config::AnalysisConfig,
    import::parse_statement,
    models::{Cadence, KnownBill, PatternType},
    reconcile::MatchTieBreak,
    Analyzer, CategoryRule,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Statement fixture with a summary preamble, 3 months of a $15.49
/// streaming charge and a $1,200 rent payment, a payroll credit, the Chase
/// card payment from the reconciliation scenario, and a one-off purchase.
fn statement_csv() -> &'static str {
    r#"Description,,Summary Amt.
Beginning balance as of 09/01/2024,,"5,000.00"
Total credits,,"6,000.00"
Total debits,,"-3,846.47"

Date,Description,Amount,Running Bal.
09/01/2024,Beginning balance as of 09/01/2024,,"5,000.00"
09/02/2024,EMPLOYER PAYROLL DES:DIRECT DEP,"2,000.00","7,000.00"
09/05/2024,NETFLIX.COM,-15.49,"6,984.51"
09/15/2024,ACME PROPERTY MGMT,"-1,200.00","5,784.51"
10/02/2024,EMPLOYER PAYROLL DES:DIRECT DEP,"2,000.00","7,784.51"
10/05/2024,NETFLIX.COM,-15.49,"7,769.02"
10/15/2024,ACME PROPERTY MGMT,"-1,200.00","6,569.02"
11/02/2024,EMPLOYER PAYROLL DES:DIRECT DEP,"2,000.00","8,569.02"
11/04/2024,NETFLIX.COM,-15.49,"8,553.53"
11/05/2024,CHASE CREDIT CARD 1 PAYMENT,-200.00,"8,353.53"
11/15/2024,ACME PROPERTY MGMT,"-1,200.00","7,153.53"
11/20/2024,HARDWARE STORE,-15.00,"7,138.53"
"#
}

#[test]
fn test_full_statement_analysis_workflow() {
    let result = parse_statement(statement_csv().as_bytes()).expect("statement parses");
    assert_eq!(result.transactions.len(), 11);
    assert_eq!(result.rows_skipped, 1);

    let mut config = AnalysisConfig::default();
    config.classifier.min_occurrences = 3;
    config.category_rules.push(CategoryRule {
        name: "Streaming".to_string(),
        pattern: "NETFLIX".to_string(),
        pattern_type: PatternType::Contains,
        amount_range: None,
    });

    let known_bills = vec![KnownBill {
        due_date: date(2024, 11, 2),
        description: "Chase Credit Card 1".to_string(),
        category: "Credit Cards".to_string(),
        amount: 200.0,
    }];

    let analyzer = Analyzer::new(config).unwrap();
    let today = date(2024, 11, 10);
    let report = analyzer
        .analyze(&result.transactions, &known_bills, today)
        .expect("analysis succeeds");

    // Two monthly bills discovered; payroll is a credit and the hardware
    // store is a one-off, so neither appears
    assert_eq!(report.discovered_bills.len(), 2);
    let netflix = report
        .discovered_bills
        .iter()
        .find(|b| b.description == "NETFLIX.COM")
        .expect("streaming bill discovered");
    assert_eq!(netflix.cadence, Cadence::Monthly);
    assert!((netflix.amount.unwrap() - 15.49).abs() < 1e-9);
    assert!(netflix.confidence > 0.9);

    let rent = report
        .discovered_bills
        .iter()
        .find(|b| b.description == "ACME PROPERTY MGMT")
        .expect("rent discovered");
    // Last paid Nov 15, typical day 15 -> Dec 15
    assert_eq!(rent.next_due, Some(date(2024, 12, 15)));

    // Chase reconciliation scenario: substring match, exact amount, same
    // calendar month as the due date
    assert_eq!(report.reconciled_bills.len(), 1);
    let chase = &report.reconciled_bills[0];
    assert!(chase.is_paid);
    assert_eq!(chase.actual_payment_date, Some(date(2024, 11, 5)));
    assert_eq!(chase.actual_amount, Some(200.0));
    assert_eq!(chase.difference, Some(0.0));

    // Outlook: streaming due Dec 4 and rent due Dec 15 are both upcoming
    // relative to Nov 10
    assert!(report.outlook.paid.is_empty());
    assert_eq!(report.outlook.upcoming.len(), 2);
    assert!(report.outlook.unscheduled.is_empty());
    let expected_total = 15.49 + 1200.0;
    assert!((report.outlook.monthly_total - expected_total).abs() < 1e-9);

    // Category rules applied before reporting
    let streaming = report
        .category_totals
        .iter()
        .find(|c| c.category == "Streaming")
        .expect("streaming category present");
    assert_eq!(streaming.transaction_count, 3);
    assert!((streaming.total - 3.0 * 15.49).abs() < 1e-9);

    // Spending summary counts only rows with amounts
    assert_eq!(report.summary.transaction_count, 11);
    assert_eq!(report.summary.total_credits, 6000.0);
}

#[test]
fn test_analysis_is_order_independent() {
    let result = parse_statement(statement_csv().as_bytes()).unwrap();
    let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();
    let today = date(2024, 11, 10);

    let forward = analyzer.analyze(&result.transactions, &[], today).unwrap();

    let mut shuffled = result.transactions.clone();
    shuffled.reverse();
    let backward = analyzer.analyze(&shuffled, &[], today).unwrap();

    assert_eq!(forward.patterns.len(), backward.patterns.len());
    for pattern in &forward.patterns {
        let other = backward
            .patterns
            .iter()
            .find(|p| p.key == pattern.key)
            .expect("same clusters under both orders");
        assert_eq!(pattern.occurrences, other.occurrences);
        assert_eq!(pattern.cadence, other.cadence);
        assert_eq!(pattern.confidence, other.confidence);
        assert_eq!(pattern.typical_amount, other.typical_amount);
    }
    assert_eq!(
        forward.outlook.monthly_total,
        backward.outlook.monthly_total
    );
}

#[test]
fn test_no_known_bills_degrades_to_empty_reconciliation() {
    let result = parse_statement(statement_csv().as_bytes()).unwrap();
    let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();

    let report = analyzer
        .analyze(&result.transactions, &[], date(2024, 11, 10))
        .unwrap();
    assert!(report.reconciled_bills.is_empty());
    // Everything else still computed
    assert!(!report.discovered_bills.is_empty());
}

#[test]
fn test_day_snap_clamps_through_the_pipeline() {
    // Bill paid on the 31st each month it exists; Jan 31 + 1 month with
    // typical day 31 lands on Feb 29 in a leap year
    let csv = "Date,Description,Amount,Running Bal.\n\
               11/30/2023,STORAGE UNIT,-90.00,910.00\n\
               12/31/2023,STORAGE UNIT,-90.00,820.00\n\
               01/31/2024,STORAGE UNIT,-90.00,730.00\n";
    let result = parse_statement(csv.as_bytes()).unwrap();

    let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();
    let report = analyzer
        .analyze(&result.transactions, &[], date(2024, 2, 1))
        .unwrap();

    assert_eq!(report.discovered_bills.len(), 1);
    let bill = &report.discovered_bills[0];
    assert_eq!(bill.cadence, Cadence::Monthly);
    assert_eq!(bill.typical_day, 31);
    assert_eq!(bill.next_due, Some(date(2024, 2, 29)));
}

#[test]
fn test_tie_break_modes_differ_on_double_payment() {
    let csv = "Date,Description,Amount,Running Bal.\n\
               06/02/2024,GYM MONTHLY DUES,-25.00,975.00\n\
               06/18/2024,GYM MONTHLY DUES,-25.00,950.00\n";
    let result = parse_statement(csv.as_bytes()).unwrap();
    let bills = vec![KnownBill {
        due_date: date(2024, 6, 20),
        description: "Gym Monthly".to_string(),
        category: "Fitness".to_string(),
        amount: 25.0,
    }];

    let closest = Analyzer::new(AnalysisConfig::default()).unwrap();
    let report = closest
        .analyze(&result.transactions, &bills, date(2024, 7, 1))
        .unwrap();
    assert_eq!(
        report.reconciled_bills[0].actual_payment_date,
        Some(date(2024, 6, 18))
    );

    let mut legacy_config = AnalysisConfig::default();
    legacy_config.tie_break = MatchTieBreak::FirstInList;
    let legacy = Analyzer::new(legacy_config).unwrap();
    let report = legacy
        .analyze(&result.transactions, &bills, date(2024, 7, 1))
        .unwrap();
    assert_eq!(
        report.reconciled_bills[0].actual_payment_date,
        Some(date(2024, 6, 2))
    );
}
