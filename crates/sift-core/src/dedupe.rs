//! Duplicate detection for staged transactions
//!
//! Identity is structural: two transactions are the same economic event iff
//! their date, description, and amount agree. Staged candidates have no id
//! yet, so nothing else is available to compare. This is a heuristic, not a
//! fingerprint: two genuinely distinct transactions with identical
//! date/description/amount are indistinguishable and will be collapsed.
//! The category deliberately does not participate in identity, so re-importing
//! a statement after a category-table change still dedupes cleanly.
//!
//! The dedup check is check-then-act against the persistence collaborator:
//! the caller supplies a snapshot of existing keys which may be stale if
//! another session inserts concurrently. That race is accepted rather than
//! solved here.

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::debug;

use crate::models::{StagedTransaction, Transaction};

/// Structural dedup key: `trim(date) | lowercase(trim(description)) | amount`
/// with the amount fixed to two decimal places.
pub fn dedupe_key(date: &str, description: &str, amount: f64) -> String {
    format!(
        "{}|{}|{:.2}",
        date.trim(),
        description.trim().to_lowercase(),
        amount
    )
}

/// SHA-256 fingerprint of the structural key, for the persistence collaborator
pub fn import_hash(date: &str, description: &str, amount: f64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(dedupe_key(date, description, amount).as_bytes());
    hex::encode(hasher.finalize())
}

/// Dedup keys of every transaction already in the ledger snapshot
pub fn existing_keys(transactions: &[Transaction]) -> HashSet<String> {
    transactions.iter().map(|t| t.dedupe_key()).collect()
}

/// Result of partitioning staged candidates against the ledger
#[derive(Debug)]
pub struct DedupeOutcome {
    /// Candidates not present in the ledger, in original order
    pub new: Vec<StagedTransaction>,
    pub duplicate_count: usize,
}

/// Partition staged candidates into new vs already-persisted.
///
/// Candidates whose key is in `existing` count as duplicates, as does a
/// second candidate with the same key within the batch itself (the same
/// statement uploaded twice in one file). Order of `new` preserves input
/// order. Zero new records is a valid outcome, not a failure.
pub fn filter_duplicates(
    staged: Vec<StagedTransaction>,
    existing: &HashSet<String>,
) -> DedupeOutcome {
    let mut seen_in_batch: HashSet<String> = HashSet::new();
    let mut new = Vec::new();
    let mut duplicate_count = 0;

    for candidate in staged {
        let key = candidate.dedupe_key();
        if existing.contains(&key) || !seen_in_batch.insert(key) {
            duplicate_count += 1;
        } else {
            new.push(candidate);
        }
    }

    debug!(
        "Dedup: {} new, {} duplicates",
        new.len(),
        duplicate_count
    );

    DedupeOutcome {
        new,
        duplicate_count,
    }
}
