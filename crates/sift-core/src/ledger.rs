//! Persistence-boundary adapter
//!
//! The hosted backend stores ledger rows with its own column conventions:
//! older rows carry capitalized field names (`Date`, `Description`, ...)
//! while newer ones are lowercase. This module reconciles both into the
//! core's canonical [`Transaction`] shape so nothing downstream ever sees a
//! raw persistence record. Column-name normalization, multi-tenancy scoping
//! and pagination stay on the collaborator's side.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

use crate::categorize::FALLBACK_CATEGORY;
use crate::dates::format_date;
use crate::models::{StagedTransaction, Transaction};

/// A ledger row as exchanged with the persistence collaborator.
///
/// Deserialization accepts the legacy capitalized field names alongside the
/// normalized ones; serialization always emits the normalized form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    #[serde(default, alias = "Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Tenant scope, managed by the collaborator
    #[serde(default, alias = "UserId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Canonical "YYYY-MM-DD" string
    #[serde(alias = "Date")]
    pub date: String,
    #[serde(alias = "Description", alias = "Narration")]
    pub description: String,
    #[serde(alias = "Amount")]
    pub amount: f64,
    #[serde(default, alias = "Category")]
    pub category: Option<String>,
}

/// A ledger snapshot converted to the canonical shape
#[derive(Debug)]
pub struct LedgerSnapshot {
    pub transactions: Vec<Transaction>,
    /// Rows excluded because their date was not canonical
    pub skipped: usize,
}

fn canonical_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

/// Convert persistence rows into canonical transactions.
///
/// Rows whose date is not a valid zero-padded `YYYY-MM-DD` are excluded and
/// counted rather than guessed at; a row without a category falls back to
/// the default. Aggregations downstream rely on every date here being
/// well-formed.
pub fn from_ledger_rows(rows: Vec<LedgerRow>) -> LedgerSnapshot {
    let mut transactions = Vec::with_capacity(rows.len());
    let mut skipped = 0;

    for row in rows {
        let date_str = row.date.trim();
        if !canonical_date_re().is_match(date_str) {
            debug!("Skipping ledger row with malformed date: {:?}", row.date);
            skipped += 1;
            continue;
        }
        let date = match chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
                // Matches the shape but not the calendar (e.g. 2025-02-31)
                debug!("Skipping ledger row with impossible date: {:?}", row.date);
                skipped += 1;
                continue;
            }
        };

        transactions.push(Transaction {
            id: row.id,
            date,
            description: row.description,
            amount: row.amount,
            category: row
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_CATEGORY.to_string()),
            recurring: None,
        });
    }

    if skipped > 0 {
        debug!("Ledger snapshot: excluded {} malformed rows", skipped);
    }

    LedgerSnapshot {
        transactions,
        skipped,
    }
}

/// Insert payload for a reviewed staged transaction
pub fn to_ledger_row(staged: &StagedTransaction, user_id: Option<&str>) -> LedgerRow {
    LedgerRow {
        id: None,
        user_id: user_id.map(str::to_string),
        date: format_date(staged.date),
        description: staged.description.clone(),
        amount: staged.amount,
        category: Some(staged.category.clone()),
    }
}
