//! Sift CLI - bank statement normalization and spending analytics
//!
//! Usage:
//!   sift import --file statement.csv --ledger ledger.json
//!   sift report summary --ledger ledger.json
//!   sift detect --ledger ledger.json
//!   sift forecast --ledger ledger.json --window 3

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Import {
            file,
            ledger,
            output,
            user,
        } => commands::cmd_import(&file, ledger.as_deref(), output.as_deref(), user.as_deref()),
        Commands::Report { kind, ledger, json } => commands::cmd_report(kind, &ledger, json),
        Commands::Detect {
            ledger,
            min_occurrences,
            max_cv,
            min_samples,
            moderate_z,
            severe_z,
            json,
        } => {
            let config = sift_core::DetectionConfig {
                recurring_min_occurrences: min_occurrences,
                recurring_max_cv: max_cv,
                anomaly_min_samples: min_samples,
                anomaly_moderate_z: moderate_z,
                anomaly_severe_z: severe_z,
            };
            commands::cmd_detect(&ledger, &config, json)
        }
        Commands::Forecast {
            ledger,
            window,
            json,
        } => commands::cmd_forecast(&ledger, window, json),
    }
}
