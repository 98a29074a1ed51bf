//! Slab-based income tax

use super::common::{ensure_non_negative, ensure_positive};
use super::product::ProductType;
use super::result::{round_rupee, CalculationResult, Metrics, TaxMetrics};
use crate::error::CalcResult;
use crate::tax::TaxSlabTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxInput {
    /// Gross annual income
    pub income: f64,
    /// Deductions subtracted before applying slabs
    pub deductions: f64,
}

impl TaxInput {
    pub fn new(income: f64) -> Self {
        Self { income, deductions: 0.0 }
    }

    pub fn taxable_income(&self) -> f64 {
        (self.income - self.deductions).max(0.0)
    }
}

/// Apply the slab table to taxable income, then cess on the computed tax.
///
/// Totals: invested is gross income, maturity is income after tax, so
/// profit is the negative of the total tax. There is no series.
pub fn income_tax(input: &TaxInput, table: &TaxSlabTable) -> CalcResult<CalculationResult> {
    ensure_positive("income", input.income)?;
    ensure_non_negative("deductions", input.deductions)?;

    let taxable = input.taxable_income();
    let breakdown = table.slab_breakdown(taxable);
    let tax_before_cess: f64 = breakdown.iter().map(|slab| slab.tax).sum();
    let cess = tax_before_cess * table.cess_percent / 100.0;
    let total_tax = tax_before_cess + cess;

    let metrics = Metrics::Tax(TaxMetrics {
        regime: table.name.clone(),
        taxable_income: round_rupee(taxable),
        tax_before_cess: round_rupee(tax_before_cess),
        cess: round_rupee(cess),
        total_tax: round_rupee(total_tax),
        effective_rate_percent: total_tax / input.income * 100.0,
        breakdown,
    });

    Ok(CalculationResult::from_totals(
        ProductType::Tax,
        input.income,
        input.income - total_tax,
        metrics,
        Vec::new(),
    ))
}
