//! Run every scenario in a CSV file and write one summary row per scenario
//!
//! Environment:
//! - `SCENARIO_FILE` input scenarios (default `data/scenarios/sample.csv`)
//! - `OUTPUT_FILE` summary output (default `batch_output.csv`)
//! - `TAX_TABLE_DIR` tax slab tables (built-in tables when unset)

use anyhow::{Context, Result};
use finance_calculator::inputs::{load_scenarios, loader::DEFAULT_SCENARIO_PATH};
use finance_calculator::{format_rupees, CalcResult, CalculationResult, ScenarioRunner};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

const DEFAULT_OUTPUT_PATH: &str = "batch_output.csv";

/// One line of the batch summary
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    id: &'a str,
    product: &'a str,
    invested: Option<f64>,
    maturity: Option<f64>,
    profit: Option<f64>,
    degenerate: Option<bool>,
    error: Option<String>,
}

impl<'a> SummaryRow<'a> {
    fn new(id: &'a str, product: &'a str, result: &CalcResult<CalculationResult>) -> Self {
        match result {
            Ok(r) => Self {
                id,
                product,
                invested: Some(r.invested_amount),
                maturity: Some(r.maturity_amount),
                profit: Some(r.profit),
                degenerate: Some(r.degenerate),
                error: None,
            },
            Err(e) => Self {
                id,
                product,
                invested: None,
                maturity: None,
                profit: None,
                degenerate: None,
                error: Some(e.to_string()),
            },
        }
    }
}

fn path_from_env(key: &str, default: &str) -> PathBuf {
    env::var(key).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    let scenario_path = path_from_env("SCENARIO_FILE", DEFAULT_SCENARIO_PATH);
    let output_path = path_from_env("OUTPUT_FILE", DEFAULT_OUTPUT_PATH);

    println!("Loading scenarios from {}...", scenario_path.display());
    let rows = load_scenarios(&scenario_path)
        .with_context(|| format!("loading {}", scenario_path.display()))?;
    println!("Loaded {} scenarios in {:?}", rows.len(), start.elapsed());

    let runner = match env::var("TAX_TABLE_DIR") {
        Ok(dir) => ScenarioRunner::from_csv_path(Path::new(&dir))
            .with_context(|| format!("loading tax tables from {dir}"))?,
        Err(_) => ScenarioRunner::new(),
    };

    println!("Running calculations...");
    let calc_start = Instant::now();

    // Run calculations in parallel; collect keeps input order
    let results: Vec<CalcResult<CalculationResult>> = rows
        .par_iter()
        .map(|row| runner.run(row.product, &row.inputs))
        .collect();

    info!("Calculations complete in {:?}", calc_start.elapsed());

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let mut failures = 0;
    let mut total_invested = 0.0;
    let mut total_maturity = 0.0;

    for (row, result) in rows.iter().zip(&results) {
        match result {
            Ok(r) => {
                total_invested += r.invested_amount;
                total_maturity += r.maturity_amount;
            }
            Err(e) => {
                warn!("scenario {} ({}) failed: {}", row.id, row.product, e);
                failures += 1;
            }
        }
        writer.serialize(SummaryRow::new(&row.id, row.product.as_str(), result))?;
    }
    writer.flush()?;

    println!("Output written to {}", output_path.display());

    println!("\nBatch Summary:");
    println!("  Scenarios: {} ({} failed)", rows.len(), failures);
    println!("  Total invested: {}", format_rupees(total_invested));
    println!("  Total maturity: {}", format_rupees(total_maturity));
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
