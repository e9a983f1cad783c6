//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Sift - Turn bank statements into a categorized ledger and insights
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Bank statement normalization and spending analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a statement export and stage new transactions
    Import {
        /// Statement CSV file to parse
        #[arg(short, long)]
        file: PathBuf,

        /// Ledger snapshot (JSON array of ledger rows) to dedupe against
        #[arg(short, long)]
        ledger: Option<PathBuf>,

        /// Write accepted rows here as JSON for the persistence backend
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// User scope stamped onto the output rows
        #[arg(long)]
        user: Option<String>,
    },

    /// Render aggregates over a ledger snapshot
    Report {
        /// Which aggregate to render
        #[arg(value_enum)]
        kind: ReportKind,

        /// Ledger snapshot (JSON array of ledger rows)
        #[arg(short, long)]
        ledger: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Detect recurring charges and spending anomalies
    Detect {
        /// Ledger snapshot (JSON array of ledger rows)
        #[arg(short, long)]
        ledger: PathBuf,

        /// Minimum occurrences for a recurring pattern
        #[arg(long, default_value_t = 3)]
        min_occurrences: usize,

        /// Maximum coefficient of variation of charge intervals
        #[arg(long, default_value_t = 0.5)]
        max_cv: f64,

        /// Minimum expenses per category before anomaly stats apply
        #[arg(long, default_value_t = 5)]
        min_samples: usize,

        /// z-score at which an expense is flagged
        #[arg(long, default_value_t = 2.0)]
        moderate_z: f64,

        /// z-score at which a flagged expense is severe
        #[arg(long, default_value_t = 3.0)]
        severe_z: f64,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Project next month's income and expenses
    Forecast {
        /// Ledger snapshot (JSON array of ledger rows)
        #[arg(short, long)]
        ledger: PathBuf,

        /// Trailing months to average
        #[arg(short, long, default_value_t = 3)]
        window: usize,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportKind {
    /// Overall income/expense/savings totals
    Summary,
    /// Per-month rollup
    Monthly,
    /// Per-category breakdown
    Categories,
}
