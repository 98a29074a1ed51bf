//! Income-tax slab tables
//!
//! Built-in tables cover the new and old personal tax regimes; other tables
//! can be loaded from CSV (see [`loader`]). Rebates and surcharge are not
//! modelled.

pub mod loader;

pub use loader::DEFAULT_TAX_TABLE_PATH;

use crate::error::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const NEW_REGIME: &str = "new";
pub const OLD_REGIME: &str = "old";

/// Health and education cess on computed tax, percent
pub const DEFAULT_CESS_PERCENT: f64 = 4.0;

/// One bracket: income in `[lower, upper)` taxed at `rate_percent`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub lower: f64,
    /// None for the top, unbounded slab
    pub upper: Option<f64>,
    pub rate_percent: f64,
}

impl TaxSlab {
    pub fn new(lower: f64, upper: Option<f64>, rate_percent: f64) -> Self {
        Self { lower, upper, rate_percent }
    }

    /// Portion of `income` that falls inside this slab
    pub fn taxable_portion(&self, income: f64) -> f64 {
        let top = self.upper.map_or(income, |u| income.min(u));
        (top - self.lower).max(0.0)
    }
}

/// Tax owed within one slab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabTax {
    pub lower: f64,
    pub upper: Option<f64>,
    pub rate_percent: f64,
    pub taxable_amount: f64,
    pub tax: f64,
}

/// Progressive slab table plus cess
#[derive(Debug, Clone, PartialEq)]
pub struct TaxSlabTable {
    pub name: String,
    slabs: Vec<TaxSlab>,
    pub cess_percent: f64,
}

impl TaxSlabTable {
    /// Build a table, checking the slabs are contiguous from zero
    pub fn new(name: &str, slabs: Vec<TaxSlab>, cess_percent: f64) -> CalcResult<Self> {
        let table = Self {
            name: name.to_string(),
            slabs,
            cess_percent,
        };
        table.validate()?;
        Ok(table)
    }

    /// New regime slabs
    pub fn new_regime() -> Self {
        Self {
            name: NEW_REGIME.to_string(),
            slabs: vec![
                TaxSlab::new(0.0, Some(300_000.0), 0.0),
                TaxSlab::new(300_000.0, Some(700_000.0), 5.0),
                TaxSlab::new(700_000.0, Some(1_000_000.0), 10.0),
                TaxSlab::new(1_000_000.0, Some(1_200_000.0), 15.0),
                TaxSlab::new(1_200_000.0, Some(1_500_000.0), 20.0),
                TaxSlab::new(1_500_000.0, None, 30.0),
            ],
            cess_percent: DEFAULT_CESS_PERCENT,
        }
    }

    /// Old regime slabs (individuals below 60)
    pub fn old_regime() -> Self {
        Self {
            name: OLD_REGIME.to_string(),
            slabs: vec![
                TaxSlab::new(0.0, Some(250_000.0), 0.0),
                TaxSlab::new(250_000.0, Some(500_000.0), 5.0),
                TaxSlab::new(500_000.0, Some(1_000_000.0), 20.0),
                TaxSlab::new(1_000_000.0, None, 30.0),
            ],
            cess_percent: DEFAULT_CESS_PERCENT,
        }
    }

    /// Load `<regime>.csv` and its cess from a table directory
    pub fn from_csv_path(dir: &Path, regime: &str) -> CalcResult<Self> {
        let slabs = loader::load_slabs(dir, regime)?;
        let cess = loader::load_cess(dir, regime)?;
        Self::new(regime, slabs, cess)
    }

    pub fn slabs(&self) -> &[TaxSlab] {
        &self.slabs
    }

    /// Tax per slab for a taxable income, cumulative across brackets
    pub fn slab_breakdown(&self, taxable_income: f64) -> Vec<SlabTax> {
        self.slabs
            .iter()
            .map(|slab| {
                let taxable_amount = slab.taxable_portion(taxable_income);
                SlabTax {
                    lower: slab.lower,
                    upper: slab.upper,
                    rate_percent: slab.rate_percent,
                    taxable_amount,
                    tax: taxable_amount * slab.rate_percent / 100.0,
                }
            })
            .collect()
    }

    fn validate(&self) -> CalcResult<()> {
        let first = self
            .slabs
            .first()
            .ok_or_else(|| CalcError::SlabTable(format!("{}: no slabs", self.name)))?;
        if first.lower != 0.0 {
            return Err(CalcError::SlabTable(format!(
                "{}: first slab must start at 0",
                self.name
            )));
        }

        for (idx, slab) in self.slabs.iter().enumerate() {
            if !(0.0..=100.0).contains(&slab.rate_percent) {
                return Err(CalcError::SlabTable(format!(
                    "{}: rate {} out of range",
                    self.name, slab.rate_percent
                )));
            }
            let is_last = idx + 1 == self.slabs.len();
            match (slab.upper, is_last) {
                (None, false) => {
                    return Err(CalcError::SlabTable(format!(
                        "{}: only the last slab may be unbounded",
                        self.name
                    )))
                }
                (Some(upper), _) if upper <= slab.lower => {
                    return Err(CalcError::SlabTable(format!(
                        "{}: slab upper {} not above lower {}",
                        self.name, upper, slab.lower
                    )))
                }
                (Some(upper), true) => {
                    return Err(CalcError::SlabTable(format!(
                        "{}: last slab must be unbounded, found upper {}",
                        self.name, upper
                    )))
                }
                _ => {}
            }
            if let Some(next) = self.slabs.get(idx + 1) {
                if slab.upper != Some(next.lower) {
                    return Err(CalcError::SlabTable(format!(
                        "{}: gap or overlap at {}",
                        self.name, next.lower
                    )));
                }
            }
        }

        if !(0.0..=100.0).contains(&self.cess_percent) {
            return Err(CalcError::SlabTable(format!(
                "{}: cess {} out of range",
                self.name, self.cess_percent
            )));
        }
        Ok(())
    }
}

impl Default for TaxSlabTable {
    fn default() -> Self {
        Self::new_regime()
    }
}
