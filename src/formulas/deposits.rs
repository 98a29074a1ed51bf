//! Guaranteed-return deposits: FD, RD and PPF

use super::common::{
    annuity_due_factor, ensure_non_negative, ensure_positive, ensure_years, growth_factor,
    monthly_rate, MONTHS_PER_YEAR,
};
use super::product::ProductType;
use super::result::{CalculationResult, Metrics, SeriesPoint};
use crate::error::{CalcError, CalcResult};
use log::debug;

/// Banks compound FDs quarterly unless told otherwise
pub const DEFAULT_FD_COMPOUNDING: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FdInput {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: u32,
    /// Compounding periods per year (1, 2, 4 or 12)
    pub compounding_per_year: u32,
}

impl FdInput {
    pub fn quarterly(principal: f64, annual_rate: f64, years: u32) -> Self {
        Self {
            principal,
            annual_rate,
            years,
            compounding_per_year: DEFAULT_FD_COMPOUNDING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RdInput {
    pub monthly_deposit: f64,
    pub annual_rate: f64,
    pub years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PpfInput {
    pub yearly_deposit: f64,
    pub annual_rate: f64,
    pub years: u32,
}

/// FD maturity: `P * (1 + r/q)^(q*t)`
pub fn fd(input: &FdInput) -> CalcResult<CalculationResult> {
    ensure_positive("principal", input.principal)?;
    ensure_non_negative("rate", input.annual_rate)?;
    ensure_years("years", input.years)?;
    let q = input.compounding_per_year;
    if !matches!(q, 1 | 2 | 4 | 12) {
        return Err(CalcError::invalid_input(
            "compounding_per_year",
            "must be 1, 2, 4 or 12",
        ));
    }

    if input.years == 0 {
        debug!("fd: zero duration, returning empty series");
        return Ok(CalculationResult::zero_duration(ProductType::Fd, 0));
    }

    let period_rate = input.annual_rate / 100.0 / q as f64;
    let value_at = |year: u32| input.principal * growth_factor(period_rate, q * year);

    let series: Vec<SeriesPoint> = (1..=input.years)
        .map(|year| SeriesPoint::new(year, input.principal, value_at(year)))
        .collect();

    Ok(CalculationResult::from_totals(
        ProductType::Fd,
        input.principal,
        value_at(input.years),
        Metrics::Plain,
        series,
    )
    .with_degenerate(input.annual_rate == 0.0))
}

/// RD maturity: monthly deposits, monthly compounding, annuity-due
pub fn rd(input: &RdInput) -> CalcResult<CalculationResult> {
    ensure_positive("monthly_deposit", input.monthly_deposit)?;
    ensure_non_negative("rate", input.annual_rate)?;
    ensure_years("years", input.years)?;

    if input.years == 0 {
        debug!("rd: zero duration, returning empty series");
        return Ok(CalculationResult::zero_duration(ProductType::Rd, 0));
    }

    let rate = monthly_rate(input.annual_rate);
    let value_at = |months: u32| input.monthly_deposit * annuity_due_factor(rate, months);

    let series: Vec<SeriesPoint> = (1..=input.years)
        .map(|year| {
            let months = year * MONTHS_PER_YEAR;
            SeriesPoint::new(year, input.monthly_deposit * months as f64, value_at(months))
        })
        .collect();

    let months = input.years * MONTHS_PER_YEAR;
    Ok(CalculationResult::from_totals(
        ProductType::Rd,
        input.monthly_deposit * months as f64,
        value_at(months),
        Metrics::Plain,
        series,
    )
    .with_degenerate(input.annual_rate == 0.0))
}

/// PPF maturity: yearly deposits at the start of each year, annual compounding
pub fn ppf(input: &PpfInput) -> CalcResult<CalculationResult> {
    ensure_positive("yearly_deposit", input.yearly_deposit)?;
    ensure_non_negative("rate", input.annual_rate)?;
    ensure_years("years", input.years)?;

    if input.years == 0 {
        debug!("ppf: zero duration, returning empty series");
        return Ok(CalculationResult::zero_duration(ProductType::Ppf, 0));
    }

    let rate = input.annual_rate / 100.0;
    let value_at = |years: u32| input.yearly_deposit * annuity_due_factor(rate, years);

    let series: Vec<SeriesPoint> = (1..=input.years)
        .map(|year| SeriesPoint::new(year, input.yearly_deposit * year as f64, value_at(year)))
        .collect();

    Ok(CalculationResult::from_totals(
        ProductType::Ppf,
        input.yearly_deposit * input.years as f64,
        value_at(input.years),
        Metrics::Plain,
        series,
    )
    .with_degenerate(input.annual_rate == 0.0))
}
