//! Detection and forecast command implementations

use std::path::Path;

use anyhow::Result;
use serde_json::json;
use sift_core::{
    build_forecast, detect_anomalies, detect_recurring, format_date, DetectionConfig,
};

use super::{load_ledger, money};

pub fn cmd_detect(ledger_path: &Path, config: &DetectionConfig, json_out: bool) -> Result<()> {
    let ledger = load_ledger(ledger_path)?;

    let recurring = detect_recurring(&ledger, config);
    let anomalies = detect_anomalies(&ledger, config);

    if json_out {
        let payload = json!({
            "recurring": recurring.patterns,
            "anomalies": anomalies,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("🔍 Recurring charges: {}", recurring.patterns.len());
    for p in &recurring.patterns {
        println!(
            "   {:<32} x{:<3} every ~{:.0} days (last {})",
            p.key,
            p.count,
            p.avg_interval_days,
            format_date(p.last_date)
        );
    }

    println!();
    println!("⚠️  Anomalies: {}", anomalies.len());
    for a in &anomalies {
        println!(
            "   {} {:<28} {:>12}  z={:.2} [{}] ({})",
            format_date(a.date),
            a.description,
            money(a.amount),
            a.z_score,
            a.severity,
            a.category
        );
    }

    Ok(())
}

pub fn cmd_forecast(ledger_path: &Path, window: usize, json_out: bool) -> Result<()> {
    let ledger = load_ledger(ledger_path)?;

    match build_forecast(&ledger, window) {
        Some(forecast) => {
            if json_out {
                println!("{}", serde_json::to_string_pretty(&forecast)?);
            } else {
                println!("🔮 Forecast for {} ({})", forecast.month, forecast.method);
                println!("   Income:   {}", money(forecast.projected_income));
                println!("   Expenses: {}", money(forecast.projected_expense));
                println!("   Savings:  {}", money(forecast.projected_savings));
            }
        }
        None => {
            if json_out {
                println!("null");
            } else {
                println!("🔮 No monthly data to forecast from");
            }
        }
    }

    Ok(())
}
