//! Sift Core Library
//!
//! The transaction normalization and analytics pipeline behind the Sift
//! personal finance dashboard:
//! - Date normalization for the mixed formats bank exports use
//! - Keyword-based multi-label categorization
//! - Statement parsing (header discovery, row extraction)
//! - Structural deduplication of staged candidates against the ledger
//! - Aggregation: summary totals, monthly rollups, category breakdowns
//! - Recurrence and anomaly detection, moving-average forecasting
//! - The persistence-boundary adapter for hosted-backend ledger rows
//!
//! Everything here is a pure, deterministic function over a ledger snapshot.
//! Storage, authentication, and rendering belong to external collaborators
//! that exchange plain records with this crate.

pub mod categorize;
pub mod dates;
pub mod dedupe;
pub mod detect;
pub mod error;
pub mod forecast;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod statement;

pub use categorize::{Categorizer, CategoryRule, FALLBACK_CATEGORY};
pub use dates::{format_date, format_display_date, parse_date};
pub use dedupe::{dedupe_key, existing_keys, filter_duplicates, DedupeOutcome};
pub use detect::{detect_anomalies, detect_recurring, DetectionConfig, RecurringReport};
pub use error::{Error, Result};
pub use forecast::{build_forecast, DEFAULT_FORECAST_WINDOW};
pub use ledger::{from_ledger_rows, to_ledger_row, LedgerRow, LedgerSnapshot};
pub use models::{
    AnomalyResult, AnomalySeverity, CategorySummary, ForecastPoint, MonthlyAggregate,
    RecurringPattern, StagedTransaction, Summary, Transaction, TransactionType,
};
pub use reports::{aggregate_categories, aggregate_monthly, summarize};
pub use statement::{parse_statement, rows_from_csv, Cell};
