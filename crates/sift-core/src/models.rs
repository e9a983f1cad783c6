//! Domain models for Sift

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::format_date;
use crate::dedupe;

/// Direction of cash movement, derived from the sign of the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    /// Credit iff amount >= 0. This is the only way a type is ever produced,
    /// so it can never disagree with the sign of the amount it came from.
    pub fn from_amount(amount: f64) -> Self {
        if amount >= 0.0 {
            Self::Credit
        } else {
            Self::Debit
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ledger transaction
///
/// The amount sign is authoritative: positive = credit (income), negative =
/// expense. The transaction type is never stored; call [`Transaction::kind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Identity assigned by the persistence collaborator; None for records
    /// that have not been committed yet
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    /// One or more labels joined by '-' (e.g. "FOOD-GROCERY SHOPPING");
    /// "Other" when no keyword matched
    pub category: String,
    /// Display hint set by recurrence detection; recomputed on every
    /// analysis pass, never ledger truth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<bool>,
}

impl Transaction {
    pub fn kind(&self) -> TransactionType {
        TransactionType::from_amount(self.amount)
    }

    /// Structural dedup identity: date + description + amount
    pub fn dedupe_key(&self) -> String {
        dedupe::dedupe_key(&format_date(self.date), &self.description, self.amount)
    }
}

/// A parsed-but-not-yet-persisted transaction candidate
///
/// Staged candidates come out of the statement parser and wait for human
/// review before the persistence collaborator commits them as [`Transaction`]s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: String,
    /// SHA-256 of the structural dedup key, carried for the persistence
    /// collaborator
    pub import_hash: String,
}

impl StagedTransaction {
    pub fn kind(&self) -> TransactionType {
        TransactionType::from_amount(self.amount)
    }

    pub fn dedupe_key(&self) -> String {
        dedupe::dedupe_key(&format_date(self.date), &self.description, self.amount)
    }
}

/// Overall ledger totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: f64,
    /// Sum of expense magnitudes (always >= 0)
    pub total_expenses: f64,
    pub net_savings: f64,
}

/// Income/expense/savings for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// "YYYY-MM"
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub savings: f64,
}

/// Income/expense totals for one category label
///
/// A multi-label transaction contributes its full amount to every one of its
/// labels, so these totals intentionally do not sum to the ledger total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub income: f64,
    pub expense: f64,
}

/// A detected recurring charge cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringPattern {
    /// Normalized description shared by the group
    pub key: String,
    /// Number of transactions in the group
    pub count: usize,
    pub avg_interval_days: f64,
    pub last_date: NaiveDate,
}

/// Anomaly severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    Moderate,
    Severe,
}

impl AnomalySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

impl std::fmt::Display for AnomalySeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense flagged as unusually large for its category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyResult {
    pub transaction_id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub z_score: f64,
    pub severity: AnomalySeverity,
}

/// Projection for the month after the latest observed month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// "YYYY-MM"
    pub month: String,
    pub projected_income: f64,
    pub projected_expense: f64,
    pub projected_savings: f64,
    pub method: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(amount: f64) -> Transaction {
        Transaction {
            id: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            description: "TEST".to_string(),
            amount,
            category: "Other".to_string(),
            recurring: None,
        }
    }

    #[test]
    fn test_type_follows_sign() {
        assert_eq!(tx(100.0).kind(), TransactionType::Credit);
        assert_eq!(tx(-100.0).kind(), TransactionType::Debit);
        // Zero counts as credit
        assert_eq!(tx(0.0).kind(), TransactionType::Credit);
    }

    #[test]
    fn test_dedupe_key_shape() {
        let t = Transaction {
            description: "  ATM WDL  ".to_string(),
            amount: -5000.0,
            ..tx(0.0)
        };
        assert_eq!(t.dedupe_key(), "2025-03-01|atm wdl|-5000.00");
    }
}
