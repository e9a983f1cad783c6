//! Import command implementation

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use sift_core::{
    existing_keys, filter_duplicates, parse_statement, rows_from_csv, to_ledger_row, Categorizer,
    TransactionType,
};

use super::load_ledger;

/// Parse a statement export, dedupe against the ledger snapshot, and report
/// (optionally write) the accepted rows.
pub fn cmd_import(
    file: &Path,
    ledger_path: Option<&Path>,
    output: Option<&Path>,
    user: Option<&str>,
) -> Result<()> {
    let statement = File::open(file)
        .with_context(|| format!("Failed to open statement file: {}", file.display()))?;

    println!("📥 Parsing statement {}...", file.display());

    let rows = rows_from_csv(statement)?;
    let staged = parse_statement(&rows, &Categorizer::default())
        .with_context(|| format!("Failed to parse statement: {}", file.display()))?;

    println!("   Found {} transactions", staged.len());

    // Dedupe against the ledger snapshot when one is provided. The snapshot
    // may be stale if another session inserts concurrently; that race is
    // resolved by human review, not here.
    let existing = match ledger_path {
        Some(path) => existing_keys(&load_ledger(path)?),
        None => Default::default(),
    };

    let outcome = filter_duplicates(staged, &existing);

    println!("✅ Import staged!");
    println!("   New: {}", outcome.new.len());
    println!("   Skipped (duplicates): {}", outcome.duplicate_count);

    if !outcome.new.is_empty() {
        let credits = outcome
            .new
            .iter()
            .filter(|t| t.kind() == TransactionType::Credit)
            .count();
        println!(
            "   Credits: {}, Debits: {}",
            credits,
            outcome.new.len() - credits
        );
    }

    if let Some(output) = output {
        let rows: Vec<_> = outcome
            .new
            .iter()
            .map(|staged| to_ledger_row(staged, user))
            .collect();
        let file = File::create(output)
            .with_context(|| format!("Failed to create output file: {}", output.display()))?;
        serde_json::to_writer_pretty(file, &rows)?;
        println!("   Wrote {} rows to {}", rows.len(), output.display());
    }

    Ok(())
}
