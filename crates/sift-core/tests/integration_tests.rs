//! Integration tests for sift-core
//!
//! These tests exercise the full statement -> staged -> dedupe -> analytics
//! pipeline the way the dashboard drives it.

use sift_core::{
    aggregate_categories, aggregate_monthly, build_forecast, detect_anomalies, detect_recurring,
    existing_keys, filter_duplicates, format_date, from_ledger_rows, parse_statement,
    rows_from_csv, summarize, to_ledger_row, Categorizer, DetectionConfig, TransactionType,
};

/// A statement export the way banks actually produce them: a few preamble
/// rows, then the header, then data with footer markers mixed in.
fn statement_csv() -> &'static str {
    "\
SOME BANK LTD,,,
Account Statement For March 2025,,,
,,,
Date,Narration,Withdrawal Amt.,Deposit Amt.
01/03/2025,ATM WDL,5000,
03/03/2025,NEFT SALARY CREDIT ACME CORP,,100000
05/03/2025,NETFLIX.COM SUBSCRIPTION,649,
07/03/2025,SWIGGY ORDER 8812,420,
10/03/2025,BIGBASKET GROCERY ORDER,\"2,350.00\",
*** End of statement ***,,,
"
}

#[test]
fn test_statement_to_staged_pipeline() {
    let rows = rows_from_csv(statement_csv().as_bytes()).unwrap();
    let staged = parse_statement(&rows, &Categorizer::default()).unwrap();

    assert_eq!(staged.len(), 5);

    // The scenario row: 01/03/2025 is day-first, so March 1st
    let atm = &staged[0];
    assert_eq!(format_date(atm.date), "2025-03-01");
    assert_eq!(atm.description, "ATM WDL");
    assert_eq!(atm.amount, -5000.0);
    assert_eq!(atm.kind(), TransactionType::Debit);
    assert_eq!(atm.category, "CASH WITHDRAWAL");

    let salary = &staged[1];
    assert_eq!(salary.amount, 100_000.0);
    assert_eq!(salary.kind(), TransactionType::Credit);

    // Comma-grouped amount cell parses after stripping
    assert_eq!(staged[4].amount, -2350.0);
}

#[test]
fn test_reimport_dedupes_everything() {
    let rows = rows_from_csv(statement_csv().as_bytes()).unwrap();
    let staged = parse_statement(&rows, &Categorizer::default()).unwrap();

    // First import: empty ledger accepts all
    let first = filter_duplicates(staged.clone(), &Default::default());
    assert_eq!(first.new.len(), 5);
    assert_eq!(first.duplicate_count, 0);

    // Commit via the persistence adapter, then re-import the same statement
    let committed: Vec<_> = first
        .new
        .iter()
        .map(|s| to_ledger_row(s, Some("user-1")))
        .collect();
    let ledger = from_ledger_rows(committed);
    assert_eq!(ledger.skipped, 0);

    let keys = existing_keys(&ledger.transactions);
    let second = filter_duplicates(staged, &keys);
    assert!(second.new.is_empty());
    assert_eq!(second.duplicate_count, 5);
}

#[test]
fn test_analytics_over_committed_ledger() {
    let rows = rows_from_csv(statement_csv().as_bytes()).unwrap();
    let staged = parse_statement(&rows, &Categorizer::default()).unwrap();
    let committed: Vec<_> = staged.iter().map(|s| to_ledger_row(s, None)).collect();
    let ledger = from_ledger_rows(committed).transactions;

    let summary = summarize(&ledger);
    assert_eq!(summary.total_income, 100_000.0);
    assert_eq!(summary.total_expenses, 5000.0 + 649.0 + 420.0 + 2350.0);
    assert_eq!(
        summary.net_savings,
        summary.total_income - summary.total_expenses
    );

    let monthly = aggregate_monthly(&ledger);
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].month, "2025-03");
    assert_eq!(monthly[0].savings, summary.net_savings);

    let categories = aggregate_categories(&ledger);
    let grocery = categories
        .iter()
        .find(|c| c.category == "GROCERY SHOPPING")
        .unwrap();
    assert_eq!(grocery.expense, 2350.0);
}

#[test]
fn test_recurring_and_forecast_across_months() {
    // Six months of salary + rent, with a couple of one-offs
    let mut csv = String::from("Date,Narration,Withdrawal Amt.,Deposit Amt.\n");
    for month in 1..=6 {
        csv.push_str(&format!("01/{:02}/2025,NEFT SALARY CREDIT,,100000\n", month));
        csv.push_str(&format!("05/{:02}/2025,UPI-RENT PAYMENT,30000,\n", month));
    }
    // One-off early in the year, outside the trailing forecast window
    csv.push_str("12/02/2025,ONE OFF ELECTRONICS,45000,\n");

    let rows = rows_from_csv(csv.as_bytes()).unwrap();
    let staged = parse_statement(&rows, &Categorizer::default()).unwrap();
    let ledger = from_ledger_rows(
        staged.iter().map(|s| to_ledger_row(s, None)).collect(),
    )
    .transactions;

    let report = detect_recurring(&ledger, &DetectionConfig::default());
    let keys: Vec<_> = report.patterns.iter().map(|p| p.key.as_str()).collect();
    assert!(keys.contains(&"neft salary credit"));
    assert!(keys.contains(&"upi rent payment"));

    let salary = report
        .patterns
        .iter()
        .find(|p| p.key == "neft salary credit")
        .unwrap();
    assert_eq!(salary.count, 6);
    assert!((salary.avg_interval_days - 30.0).abs() < 2.0);

    // One-off is annotated false, cadence members true
    let one_off = report
        .annotated
        .iter()
        .find(|t| t.description == "ONE OFF ELECTRONICS")
        .unwrap();
    assert_eq!(one_off.recurring, Some(false));

    // Forecast the month after June from the trailing three months
    let forecast = build_forecast(&ledger, 3).unwrap();
    assert_eq!(forecast.month, "2025-07");
    assert_eq!(forecast.projected_income, 100_000.0);
    assert_eq!(forecast.projected_expense, 30_000.0);
    assert_eq!(forecast.projected_savings, 70_000.0);
}

#[test]
fn test_anomalies_end_to_end() {
    let mut csv = String::from("Date,Narration,Withdrawal Amt.,Deposit Amt.\n");
    // Eleven routine grocery orders, then one ten-times larger
    for day in 1..=11 {
        csv.push_str(&format!(
            "{:02}/03/2025,BIGBASKET GROCERY ORDER,{},\n",
            day,
            2000 + day * 10
        ));
    }
    csv.push_str("20/03/2025,BIGBASKET GROCERY ORDER,40000,\n");

    let rows = rows_from_csv(csv.as_bytes()).unwrap();
    let staged = parse_statement(&rows, &Categorizer::default()).unwrap();
    let ledger = from_ledger_rows(
        staged.iter().map(|s| to_ledger_row(s, None)).collect(),
    )
    .transactions;

    let anomalies = detect_anomalies(&ledger, &DetectionConfig::default());
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].amount, -40_000.0);
    assert_eq!(anomalies[0].severity.as_str(), "severe");
}
