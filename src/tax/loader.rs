//! CSV-based tax slab loader
//!
//! Loads slab tables from `data/tax/<regime>.csv` (columns
//! `lower,upper,rate_percent`, empty `upper` for the top slab) and the cess
//! for each regime from `data/tax/cess.csv` (columns `regime,cess_percent`).

use super::TaxSlab;
use crate::error::{CalcError, CalcResult};
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Default path to tax table directory
pub const DEFAULT_TAX_TABLE_PATH: &str = "data/tax";

#[derive(Debug, Deserialize)]
struct SlabRow {
    lower: f64,
    upper: Option<f64>,
    rate_percent: f64,
}

#[derive(Debug, Deserialize)]
struct CessRow {
    regime: String,
    cess_percent: f64,
}

/// Load slab rows for a regime, in file order
pub fn load_slabs(dir: &Path, regime: &str) -> CalcResult<Vec<TaxSlab>> {
    let file = File::open(dir.join(format!("{regime}.csv")))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut slabs = Vec::new();
    for result in reader.deserialize() {
        let row: SlabRow = result?;
        slabs.push(TaxSlab::new(row.lower, row.upper, row.rate_percent));
    }

    info!("Loaded {} tax slabs for regime '{}'", slabs.len(), regime);
    Ok(slabs)
}

/// Look up the cess percentage for a regime
pub fn load_cess(dir: &Path, regime: &str) -> CalcResult<f64> {
    let file = File::open(dir.join("cess.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    for result in reader.deserialize() {
        let row: CessRow = result?;
        if row.regime.trim() == regime {
            return Ok(row.cess_percent);
        }
    }

    Err(CalcError::SlabTable(format!(
        "no cess entry for regime '{regime}'"
    )))
}
