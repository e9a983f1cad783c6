//! Recurrence and anomaly detection
//!
//! Detects:
//! - Recurring charges: groups of same-merchant transactions with regular
//!   spacing (subscription/payroll/rent cadence)
//! - Spending anomalies: expenses far outside their category's usual range,
//!   scored by z-score

use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;
use tracing::debug;

use crate::models::{AnomalyResult, AnomalySeverity, RecurringPattern, Transaction, TransactionType};

/// Detection thresholds
///
/// Configurable rather than hardcoded so deployments can tune sensitivity.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Minimum same-key transactions before a recurring pattern is considered
    pub recurring_min_occurrences: usize,
    /// Maximum coefficient of variation (std/mean) of day-gaps for a group
    /// to count as regular
    pub recurring_max_cv: f64,
    /// Minimum expense observations in a category before its statistics are
    /// trusted
    pub anomaly_min_samples: usize,
    /// z-score at which an expense is flagged
    pub anomaly_moderate_z: f64,
    /// z-score at which a flagged expense is severe
    pub anomaly_severe_z: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            recurring_min_occurrences: 3,
            recurring_max_cv: 0.5,
            anomaly_min_samples: 5,
            anomaly_moderate_z: 2.0,
            anomaly_severe_z: 3.0,
        }
    }
}

/// Result of a recurrence pass
#[derive(Debug)]
pub struct RecurringReport {
    /// Accepted patterns, one per qualifying description group
    pub patterns: Vec<RecurringPattern>,
    /// The input ledger with `recurring` set on members of accepted groups.
    /// A fresh vector; the caller's snapshot is never mutated.
    pub annotated: Vec<Transaction>,
}

/// Normalize a description into a grouping key: lowercased, runs of
/// non-alphanumeric characters collapsed to single spaces, trimmed.
pub fn normalize_description_key(description: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap());

    re.replace_all(&description.to_lowercase(), " ")
        .trim()
        .to_string()
}

/// Population mean and standard deviation
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Detect recurring charge patterns.
///
/// Transactions are grouped by normalized description. A group qualifies
/// when it has at least `recurring_min_occurrences` members and the
/// coefficient of variation of its positive day-gaps is below
/// `recurring_max_cv`, regular enough to look like a cadence rather than
/// coincidental repetition. Groups whose occurrences all share a date (no
/// positive gaps) are skipped.
pub fn detect_recurring(transactions: &[Transaction], config: &DetectionConfig) -> RecurringReport {
    let mut groups: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        groups
            .entry(normalize_description_key(&tx.description))
            .or_default()
            .push(tx);
    }

    let mut patterns = Vec::new();
    let mut recurring_keys: HashSet<String> = HashSet::new();

    for (key, group) in &groups {
        if key.is_empty() || group.len() < config.recurring_min_occurrences {
            continue;
        }

        let mut sorted: Vec<&Transaction> = group.clone();
        sorted.sort_by_key(|t| t.date);

        let gaps: Vec<f64> = sorted
            .windows(2)
            .map(|w| (w[1].date - w[0].date).num_days())
            .filter(|days| *days > 0)
            .map(|days| days as f64)
            .collect();

        if gaps.is_empty() {
            continue;
        }

        let (mean, std) = mean_and_std(&gaps);
        let cv = std / mean;
        if cv >= config.recurring_max_cv {
            debug!("Group '{}' too irregular (cv {:.2})", key, cv);
            continue;
        }

        patterns.push(RecurringPattern {
            key: key.clone(),
            count: group.len(),
            avg_interval_days: mean,
            last_date: sorted.last().map(|t| t.date).unwrap_or_default(),
        });
        recurring_keys.insert(key.clone());
    }

    let annotated: Vec<Transaction> = transactions
        .iter()
        .map(|tx| {
            let mut tx = tx.clone();
            tx.recurring =
                Some(recurring_keys.contains(&normalize_description_key(&tx.description)));
            tx
        })
        .collect();

    debug!("Recurrence: {} patterns accepted", patterns.len());

    RecurringReport {
        patterns,
        annotated,
    }
}

/// Detect per-category expense anomalies.
///
/// Only debit transactions participate, grouped by their stored category
/// string. A category needs `anomaly_min_samples` observations before its
/// statistics are trusted, and zero-variance categories (every value
/// identical) produce no meaningful z-score and are skipped. Results are
/// sorted by descending z-score.
pub fn detect_anomalies(
    transactions: &[Transaction],
    config: &DetectionConfig,
) -> Vec<AnomalyResult> {
    let mut by_category: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        if tx.kind() == TransactionType::Debit {
            by_category.entry(tx.category.as_str()).or_default().push(tx);
        }
    }

    let mut anomalies = Vec::new();

    for (category, group) in &by_category {
        if group.len() < config.anomaly_min_samples {
            continue;
        }

        let amounts: Vec<f64> = group.iter().map(|t| t.amount.abs()).collect();
        let (mean, std) = mean_and_std(&amounts);
        if std == 0.0 {
            debug!("Category '{}' has zero variance, skipping", category);
            continue;
        }

        for tx in group {
            let z = (tx.amount.abs() - mean) / std;
            if z < config.anomaly_moderate_z {
                continue;
            }

            let severity = if z >= config.anomaly_severe_z {
                AnomalySeverity::Severe
            } else {
                AnomalySeverity::Moderate
            };

            anomalies.push(AnomalyResult {
                transaction_id: tx.id,
                date: tx.date,
                description: tx.description.clone(),
                amount: tx.amount,
                category: tx.category.clone(),
                z_score: z,
                severity,
            });
        }
    }

    anomalies.sort_by(|a, b| {
        b.z_score
            .partial_cmp(&a.z_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    debug!("Anomalies: {} flagged", anomalies.len());
    anomalies
}
