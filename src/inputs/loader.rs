//! Load batch scenarios from CSV
//!
//! One row per calculation: an `id` column, a `product` column, and any
//! number of input columns named after calculator fields. Empty cells are
//! treated as absent fields, so products with different inputs can share a
//! file.

use super::RawInputs;
use crate::error::{CalcError, CalcResult};
use crate::formulas::ProductType;
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default sample scenario file
pub const DEFAULT_SCENARIO_PATH: &str = "data/scenarios/sample.csv";

/// A single calculation request from a batch file
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRow {
    pub id: String,
    pub product: ProductType,
    pub inputs: RawInputs,
}

/// Load all scenarios from a CSV file
pub fn load_scenarios(path: &Path) -> CalcResult<Vec<ScenarioRow>> {
    let file = File::open(path)?;
    let rows = read_scenarios(file)?;
    info!("Loaded {} scenarios from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse scenarios from any reader
pub fn read_scenarios<R: Read>(reader: R) -> CalcResult<Vec<ScenarioRow>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();

    let product_idx = headers
        .iter()
        .position(|h| h == "product")
        .ok_or_else(|| CalcError::invalid_input("product", "scenario file has no product column"))?;
    let id_idx = headers.iter().position(|h| h == "id");

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;

        let product: ProductType = record
            .get(product_idx)
            .unwrap_or_default()
            .parse()?;
        let id = id_idx
            .and_then(|idx| record.get(idx))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| (line + 1).to_string());

        let inputs: RawInputs = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(idx, (_, value))| *idx != product_idx && Some(*idx) != id_idx && !value.is_empty())
            .map(|(_, pair)| pair)
            .collect();

        rows.push(ScenarioRow { id, product, inputs });
    }

    Ok(rows)
}
