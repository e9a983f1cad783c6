//! Command implementations

mod detect;
mod import;
mod report;

pub use detect::{cmd_detect, cmd_forecast};
pub use import::cmd_import;
pub use report::cmd_report;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use sift_core::{from_ledger_rows, LedgerRow, Transaction};
use tracing::debug;

/// Load a ledger snapshot: a JSON array of persistence rows, legacy or
/// normalized field names.
pub fn load_ledger(path: &Path) -> Result<Vec<Transaction>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open ledger file: {}", path.display()))?;
    let rows: Vec<LedgerRow> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse ledger file: {}", path.display()))?;

    let snapshot = from_ledger_rows(rows);
    debug!(
        "Loaded {} ledger transactions from {}",
        snapshot.transactions.len(),
        path.display()
    );
    if snapshot.skipped > 0 {
        eprintln!(
            "⚠️  Skipped {} ledger rows with malformed dates",
            snapshot.skipped
        );
    }

    Ok(snapshot.transactions)
}

/// Fixed-point money rendering for tables
pub fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}
