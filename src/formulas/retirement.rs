//! Retirement corpus projection with inflation adjustment

use super::common::{ensure_non_negative, ensure_positive, MAX_AGE, MONTHS_PER_YEAR};
use super::product::ProductType;
use super::result::{round_rupee, CalculationResult, Metrics, RetirementMetrics, SeriesPoint};
use super::state::MonthlyLedger;
use crate::error::{CalcResult, ValidationError};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    /// Corpus already saved; may be zero
    pub current_savings: f64,
    /// Monthly contribution until retirement; may be zero
    pub monthly_contribution: f64,
    /// Expected annual return, percent
    pub annual_rate: f64,
    /// Expected annual inflation, percent
    pub inflation_rate: f64,
}

impl RetirementInput {
    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    /// Rules that span more than one field, all reported together
    pub fn plan_issues(&self) -> ValidationError {
        let mut issues = ValidationError::default();
        if self.retirement_age > MAX_AGE {
            issues.push("retirement_age", format!("must be at most {}", MAX_AGE));
        }
        if self.retirement_age < self.current_age {
            issues.push("retirement_age", "must not be below current_age");
        }
        if self.current_savings + self.monthly_contribution <= 0.0 {
            issues.push(
                "monthly_contribution",
                "current_savings or monthly_contribution must be greater than zero",
            );
        }
        issues
    }
}

/// Grow existing savings plus monthly contributions until retirement.
///
/// Points are keyed by age, starting with the opening position at the
/// current age. Each point carries the corpus deflated to today's money.
pub fn retirement(input: &RetirementInput) -> CalcResult<CalculationResult> {
    validate(input)?;

    let years = input.years_to_retirement();
    if years == 0 {
        debug!("retirement: already at retirement age {}", input.retirement_age);
        return Ok(CalculationResult::zero_duration(
            ProductType::Retirement,
            input.current_age,
        ));
    }

    let inflation = 1.0 + input.inflation_rate / 100.0;
    let mut ledger = MonthlyLedger::new(input.current_savings, input.annual_rate);

    let mut opening = SeriesPoint::new(input.current_age, ledger.invested, ledger.balance);
    opening.inflation_adjusted = Some(ledger.balance);
    let mut series = vec![opening];

    for _ in 0..years * MONTHS_PER_YEAR {
        ledger.advance_month();
        ledger.contribute_and_grow(input.monthly_contribution);

        if ledger.is_year_end() {
            let mut point = SeriesPoint::new(
                input.current_age + ledger.year,
                ledger.invested,
                ledger.balance,
            );
            point.inflation_adjusted = Some(ledger.balance / inflation.powi(ledger.year as i32));
            series.push(point);
        }
    }

    let real_corpus = ledger.balance / inflation.powi(years as i32);
    let metrics = Metrics::Retirement(RetirementMetrics {
        inflation_adjusted_corpus: round_rupee(real_corpus),
        years_to_retirement: years,
    });

    Ok(CalculationResult::from_totals(
        ProductType::Retirement,
        ledger.invested,
        ledger.balance,
        metrics,
        series,
    )
    .with_degenerate(input.annual_rate == 0.0))
}

fn validate(input: &RetirementInput) -> CalcResult<()> {
    ensure_positive("current_age", input.current_age as f64)?;
    ensure_non_negative("current_savings", input.current_savings)?;
    ensure_non_negative("monthly_contribution", input.monthly_contribution)?;
    ensure_non_negative("rate", input.annual_rate)?;
    ensure_non_negative("inflation", input.inflation_rate)?;
    input.plan_issues().into_result()
}
