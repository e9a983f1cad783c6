//! Ledger aggregation
//!
//! Pure computations over a ledger snapshot: overall totals, per-month
//! rollups, and per-category breakdowns. Everything is recomputed from
//! scratch on each call; there is no incremental state.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::categorize::FALLBACK_CATEGORY;
use crate::models::{CategorySummary, MonthlyAggregate, Summary, Transaction, TransactionType};

/// Overall income/expense/savings totals
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;

    for tx in transactions {
        match tx.kind() {
            TransactionType::Credit => total_income += tx.amount,
            TransactionType::Debit => total_expenses += tx.amount.abs(),
        }
    }

    Summary {
        total_income,
        total_expenses,
        net_savings: total_income - total_expenses,
    }
}

/// "YYYY-MM" month key for a transaction
pub fn month_key(tx: &Transaction) -> String {
    format!("{:04}-{:02}", tx.date.year(), tx.date.month())
}

/// Per-month income/expense/savings, months ascending.
///
/// Keys are fixed-width zero-padded, so lexicographic order is
/// chronological order and a BTreeMap gives the sort for free.
pub fn aggregate_monthly(transactions: &[Transaction]) -> Vec<MonthlyAggregate> {
    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for tx in transactions {
        let entry = months.entry(month_key(tx)).or_insert((0.0, 0.0));
        match tx.kind() {
            TransactionType::Credit => entry.0 += tx.amount,
            TransactionType::Debit => entry.1 += tx.amount.abs(),
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expense))| MonthlyAggregate {
            month,
            income,
            expense,
            savings: income - expense,
        })
        .collect()
}

/// Split a stored category string into its labels.
///
/// Multi-label categories are hyphen-joined; an empty or all-blank split
/// falls back to the default category.
pub fn split_category(category: &str) -> Vec<String> {
    let labels: Vec<String> = category
        .split('-')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if labels.is_empty() {
        vec![FALLBACK_CATEGORY.to_string()]
    } else {
        labels
    }
}

/// Per-label income/expense totals, labels ascending.
///
/// A transaction with several labels contributes its full amount to every
/// one of them. The labels are facets of the same spend, so the per-label
/// totals are not expected to sum to the ledger total.
pub fn aggregate_categories(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let mut categories: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for tx in transactions {
        for label in split_category(&tx.category) {
            let entry = categories.entry(label).or_insert((0.0, 0.0));
            match tx.kind() {
                TransactionType::Credit => entry.0 += tx.amount,
                TransactionType::Debit => entry.1 += tx.amount.abs(),
            }
        }
    }

    categories
        .into_iter()
        .map(|(category, (income, expense))| CategorySummary {
            category,
            income,
            expense,
        })
        .collect()
}
