//! Report command implementation

use std::path::Path;

use anyhow::Result;
use sift_core::{aggregate_categories, aggregate_monthly, summarize};

use super::{load_ledger, money};
use crate::cli::ReportKind;

pub fn cmd_report(kind: ReportKind, ledger_path: &Path, json: bool) -> Result<()> {
    let ledger = load_ledger(ledger_path)?;

    match kind {
        ReportKind::Summary => {
            let summary = summarize(&ledger);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("💰 Summary ({} transactions)", ledger.len());
                println!("   Income:   {}", money(summary.total_income));
                println!("   Expenses: {}", money(summary.total_expenses));
                println!("   Savings:  {}", money(summary.net_savings));
            }
        }
        ReportKind::Monthly => {
            let monthly = aggregate_monthly(&ledger);
            if json {
                println!("{}", serde_json::to_string_pretty(&monthly)?);
            } else {
                println!("📅 Monthly rollup");
                println!(
                    "   {:<8} {:>14} {:>14} {:>14}",
                    "Month", "Income", "Expense", "Savings"
                );
                for m in &monthly {
                    println!(
                        "   {:<8} {:>14} {:>14} {:>14}",
                        m.month,
                        money(m.income),
                        money(m.expense),
                        money(m.savings)
                    );
                }
            }
        }
        ReportKind::Categories => {
            let categories = aggregate_categories(&ledger);
            if json {
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                println!("🏷️  Category breakdown");
                println!(
                    "   {:<24} {:>14} {:>14}",
                    "Category", "Income", "Expense"
                );
                for c in &categories {
                    println!(
                        "   {:<24} {:>14} {:>14}",
                        c.category,
                        money(c.income),
                        money(c.expense)
                    );
                }
            }
        }
    }

    Ok(())
}
