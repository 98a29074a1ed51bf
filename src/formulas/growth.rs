//! Market-linked growth calculators: SIP, lumpsum, step-up SIP, SIP goal

use super::common::{
    annuity_due_factor, ensure_non_negative, ensure_positive, ensure_years, growth_factor,
    monthly_rate, sip_future_value, MONTHS_PER_YEAR,
};
use super::product::ProductType;
use super::result::{
    round_rupee, CalculationResult, GoalMetrics, Metrics, SeriesPoint, StepUpMetrics,
};
use super::state::MonthlyLedger;
use crate::error::{CalcError, CalcResult};
use log::debug;

/// Days per month used to turn a monthly SIP into a daily saving figure.
/// Flat 30 regardless of calendar month length.
pub const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SipInput {
    pub monthly_investment: f64,
    /// Expected annual return, percent
    pub annual_rate: f64,
    pub years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumpsumInput {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: u32,
}

/// Yearly increase applied to a step-up SIP instalment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepUp {
    /// Grow the instalment by this percentage each year
    Percent(f64),
    /// Add this many rupees to the instalment each year
    Amount(f64),
}

impl StepUp {
    /// Instalment for the following year
    pub fn apply(&self, monthly: f64) -> f64 {
        match *self {
            StepUp::Percent(pct) => monthly * (1.0 + pct / 100.0),
            StepUp::Amount(amount) => monthly + amount,
        }
    }

    fn validate(&self) -> CalcResult<()> {
        match *self {
            StepUp::Percent(pct) => ensure_non_negative("step_up_percent", pct),
            StepUp::Amount(amount) => ensure_non_negative("step_up_amount", amount),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepUpSipInput {
    pub monthly_investment: f64,
    pub annual_rate: f64,
    pub years: u32,
    pub step_up: StepUp,
}

/// Goal-seeking input: how much per month (and per day) to reach a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SipGoalInput {
    pub target_amount: f64,
    pub annual_rate: f64,
    pub years: u32,
}

/// SIP maturity: `A * ((1+i)^n - 1) / i * (1+i)` with monthly compounding
pub fn sip(input: &SipInput) -> CalcResult<CalculationResult> {
    ensure_positive("monthly_investment", input.monthly_investment)?;
    ensure_non_negative("rate", input.annual_rate)?;
    ensure_years("years", input.years)?;

    if input.years == 0 {
        debug!("sip: zero duration, returning empty series");
        return Ok(CalculationResult::zero_duration(ProductType::Sip, 0));
    }

    let series = sip_series(input.monthly_investment, input.annual_rate, input.years);
    let months = input.years * MONTHS_PER_YEAR;
    let invested = input.monthly_investment * months as f64;
    let maturity = sip_future_value(input.monthly_investment, input.annual_rate, months);

    Ok(
        CalculationResult::from_totals(ProductType::Sip, invested, maturity, Metrics::Plain, series)
            .with_degenerate(input.annual_rate == 0.0),
    )
}

/// Lumpsum maturity: `P * (1 + i)^n` with monthly compounding
pub fn lumpsum(input: &LumpsumInput) -> CalcResult<CalculationResult> {
    ensure_positive("principal", input.principal)?;
    ensure_non_negative("rate", input.annual_rate)?;
    ensure_years("years", input.years)?;

    if input.years == 0 {
        debug!("lumpsum: zero duration, returning empty series");
        return Ok(CalculationResult::zero_duration(ProductType::Lumpsum, 0));
    }

    let rate = monthly_rate(input.annual_rate);
    let series: Vec<SeriesPoint> = (1..=input.years)
        .map(|year| {
            let value = input.principal * growth_factor(rate, year * MONTHS_PER_YEAR);
            SeriesPoint::new(year, input.principal, value)
        })
        .collect();

    let maturity = input.principal * growth_factor(rate, input.years * MONTHS_PER_YEAR);

    Ok(CalculationResult::from_totals(
        ProductType::Lumpsum,
        input.principal,
        maturity,
        Metrics::Plain,
        series,
    )
    .with_degenerate(input.annual_rate == 0.0))
}

/// Step-up SIP: the instalment rises once a year, the balance carries over
/// and compounds monthly.
pub fn step_up_sip(input: &StepUpSipInput) -> CalcResult<CalculationResult> {
    ensure_positive("monthly_investment", input.monthly_investment)?;
    ensure_non_negative("rate", input.annual_rate)?;
    ensure_years("years", input.years)?;
    input.step_up.validate()?;

    if input.years == 0 {
        debug!("step-up sip: zero duration, returning empty series");
        return Ok(CalculationResult::zero_duration(ProductType::StepUpSip, 0));
    }

    let mut ledger = MonthlyLedger::new(0.0, input.annual_rate);
    let mut monthly = input.monthly_investment;
    let mut final_monthly = monthly;
    let mut series = Vec::with_capacity(input.years as usize);

    for year in 1..=input.years {
        for _ in 0..MONTHS_PER_YEAR {
            ledger.advance_month();
            ledger.contribute_and_grow(monthly);
        }

        let mut point = SeriesPoint::new(year, ledger.invested, ledger.balance);
        point.monthly_sip = Some(monthly);
        series.push(point);

        final_monthly = monthly;
        monthly = input.step_up.apply(monthly);
    }

    let metrics = Metrics::StepUp(StepUpMetrics {
        final_monthly_sip: round_rupee(final_monthly),
    });

    Ok(CalculationResult::from_totals(
        ProductType::StepUpSip,
        ledger.invested,
        ledger.balance,
        metrics,
        series,
    )
    .with_degenerate(input.annual_rate == 0.0))
}

/// Required monthly SIP for a target corpus, inverting the SIP formula:
/// `A = FV * i / (((1+i)^n - 1) * (1+i))`, or `FV / n` at a zero rate.
pub fn sip_per_day(input: &SipGoalInput) -> CalcResult<CalculationResult> {
    ensure_positive("target_amount", input.target_amount)?;
    ensure_non_negative("rate", input.annual_rate)?;
    ensure_years("years", input.years)?;

    if input.years == 0 {
        debug!("sip goal: zero duration, returning empty series");
        return Ok(CalculationResult::zero_duration(ProductType::SipPerDay, 0));
    }

    let months = input.years * MONTHS_PER_YEAR;
    let monthly =
        input.target_amount / annuity_due_factor(monthly_rate(input.annual_rate), months);
    let daily = monthly / DAYS_PER_MONTH;

    let series = sip_series(monthly, input.annual_rate, input.years);
    let invested = monthly * months as f64;
    let maturity = sip_future_value(monthly, input.annual_rate, months);

    let metrics = Metrics::Goal(GoalMetrics {
        monthly_investment: round_rupee(monthly),
        daily_saving: round_rupee(daily),
    });

    Ok(CalculationResult::from_totals(
        ProductType::SipPerDay,
        invested,
        maturity,
        metrics,
        series,
    )
    .with_degenerate(input.annual_rate == 0.0))
}

fn sip_series(monthly: f64, annual_rate: f64, years: u32) -> Vec<SeriesPoint> {
    (1..=years)
        .map(|year| {
            let months = year * MONTHS_PER_YEAR;
            SeriesPoint::new(
                year,
                monthly * months as f64,
                sip_future_value(monthly, annual_rate, months),
            )
        })
        .collect()
}

impl SipInput {
    pub fn new(monthly_investment: f64, annual_rate: f64, years: u32) -> Self {
        Self { monthly_investment, annual_rate, years }
    }
}

impl LumpsumInput {
    pub fn new(principal: f64, annual_rate: f64, years: u32) -> Self {
        Self { principal, annual_rate, years }
    }
}

impl StepUp {
    /// Pick the step-up from optional percent/amount fields; both set is an error
    pub fn from_parts(percent: Option<f64>, amount: Option<f64>) -> CalcResult<Self> {
        match (percent, amount) {
            (Some(p), Some(a)) if p > 0.0 && a > 0.0 => Err(CalcError::invalid_input(
                "step_up_amount",
                "give either step_up_percent or step_up_amount, not both",
            )),
            (_, Some(a)) if a > 0.0 => Ok(StepUp::Amount(a)),
            (Some(p), _) => Ok(StepUp::Percent(p)),
            _ => Ok(StepUp::Percent(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sip_reference_scenario() {
        let result = sip(&SipInput::new(5_000.0, 12.0, 10)).unwrap();
        assert_eq!(result.invested_amount, 600_000.0);
        assert_eq!(result.maturity_amount, 1_161_695.0);
        assert_eq!(result.profit, 561_695.0);
        assert_eq!(result.series.len(), 10);
        assert!(!result.degenerate);
    }

    #[test]
    fn test_sip_profit_identity() {
        for &(amount, rate, years) in &[(500.0, 6.5, 3), (12_345.0, 14.2, 25), (1_000.0, 0.1, 1)] {
            let result = sip(&SipInput::new(amount, rate, years)).unwrap();
            assert_eq!(result.maturity_amount - result.invested_amount, result.profit);
        }
    }

    #[test]
    fn test_sip_series_matches_totals() {
        let result = sip(&SipInput::new(5_000.0, 12.0, 10)).unwrap();
        let last = result.final_point().unwrap();
        assert_eq!(last.period, 10);
        assert!((last.value - result.maturity_amount).abs() <= 0.5);
        assert_eq!(result.series[2].invested, 180_000.0);

        // strictly increasing periods starting at 1
        for (idx, point) in result.series.iter().enumerate() {
            assert_eq!(point.period, idx as u32 + 1);
        }
    }

    #[test]
    fn test_sip_zero_rate_is_linear() {
        let result = sip(&SipInput::new(5_000.0, 0.0, 10)).unwrap();
        assert_eq!(result.maturity_amount, result.invested_amount);
        assert_eq!(result.profit, 0.0);
        assert!(result.degenerate);
    }

    #[test]
    fn test_sip_zero_years() {
        let result = sip(&SipInput::new(5_000.0, 12.0, 0)).unwrap();
        assert_eq!(result.series.len(), 1);
        assert_eq!(result.series[0].invested, 0.0);
        assert_eq!(result.series[0].value, 0.0);
        assert_eq!(result.maturity_amount, 0.0);
    }

    #[test]
    fn test_sip_rejects_bad_input() {
        assert!(matches!(
            sip(&SipInput::new(0.0, 12.0, 10)),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(sip(&SipInput::new(5_000.0, -1.0, 10)).is_err());
        assert!(sip(&SipInput::new(f64::NAN, 12.0, 10)).is_err());
    }

    #[test]
    fn test_lumpsum_reference_scenario() {
        let result = lumpsum(&LumpsumInput::new(100_000.0, 12.0, 10)).unwrap();
        assert_eq!(result.invested_amount, 100_000.0);
        assert_eq!(result.maturity_amount, 330_039.0);
        assert!(result.series.iter().all(|p| p.invested == 100_000.0));
    }

    #[test]
    fn test_lumpsum_zero_rate() {
        let result = lumpsum(&LumpsumInput::new(100_000.0, 0.0, 7)).unwrap();
        assert_eq!(result.maturity_amount, result.invested_amount);
    }

    #[test]
    fn test_step_up_percent() {
        let input = StepUpSipInput {
            monthly_investment: 5_000.0,
            annual_rate: 12.0,
            years: 3,
            step_up: StepUp::Percent(10.0),
        };
        let result = step_up_sip(&input).unwrap();

        assert_eq!(result.series[0].monthly_sip, Some(5_000.0));
        assert_relative_eq!(result.series[1].monthly_sip.unwrap(), 5_500.0, epsilon = 1e-9);
        assert_relative_eq!(result.series[2].monthly_sip.unwrap(), 6_050.0, epsilon = 1e-9);
        // 12 * (5000 + 5500 + 6050)
        assert_eq!(result.invested_amount, 198_600.0);
        assert!(result.maturity_amount > result.invested_amount);

        match result.metrics {
            Metrics::StepUp(ref m) => assert_eq!(m.final_monthly_sip, 6_050.0),
            ref other => panic!("unexpected metrics {:?}", other),
        }
    }

    #[test]
    fn test_step_up_amount() {
        let input = StepUpSipInput {
            monthly_investment: 5_000.0,
            annual_rate: 10.0,
            years: 2,
            step_up: StepUp::Amount(1_000.0),
        };
        let result = step_up_sip(&input).unwrap();
        assert_eq!(result.series[1].monthly_sip, Some(6_000.0));
        assert_eq!(result.invested_amount, 132_000.0);
    }

    #[test]
    fn test_zero_step_up_matches_plain_sip() {
        let plain = sip(&SipInput::new(5_000.0, 12.0, 10)).unwrap();
        let stepped = step_up_sip(&StepUpSipInput {
            monthly_investment: 5_000.0,
            annual_rate: 12.0,
            years: 10,
            step_up: StepUp::Percent(0.0),
        })
        .unwrap();
        assert!((plain.maturity_amount - stepped.maturity_amount).abs() <= 1.0);
    }

    #[test]
    fn test_step_up_from_parts() {
        assert_eq!(StepUp::from_parts(Some(10.0), None).unwrap(), StepUp::Percent(10.0));
        assert_eq!(StepUp::from_parts(None, Some(500.0)).unwrap(), StepUp::Amount(500.0));
        assert_eq!(StepUp::from_parts(Some(0.0), Some(500.0)).unwrap(), StepUp::Amount(500.0));
        assert_eq!(StepUp::from_parts(None, None).unwrap(), StepUp::Percent(0.0));
        assert!(StepUp::from_parts(Some(10.0), Some(500.0)).is_err());
    }

    #[test]
    fn test_sip_per_day_inverts_sip() {
        let target = sip_future_value(5_000.0, 12.0, 120);
        let result = sip_per_day(&SipGoalInput {
            target_amount: target,
            annual_rate: 12.0,
            years: 10,
        })
        .unwrap();

        match result.metrics {
            Metrics::Goal(ref goal) => {
                assert_eq!(goal.monthly_investment, 5_000.0);
                // 5000 / 30
                assert_eq!(goal.daily_saving, 167.0);
            }
            ref other => panic!("unexpected metrics {:?}", other),
        }
        assert_eq!(result.maturity_amount, 1_161_695.0);
        assert_eq!(result.invested_amount, 600_000.0);
    }

    #[test]
    fn test_sip_per_day_zero_rate() {
        let result = sip_per_day(&SipGoalInput {
            target_amount: 120_000.0,
            annual_rate: 0.0,
            years: 10,
        })
        .unwrap();
        match result.metrics {
            Metrics::Goal(ref goal) => assert_eq!(goal.monthly_investment, 1_000.0),
            ref other => panic!("unexpected metrics {:?}", other),
        }
        assert_eq!(result.maturity_amount, 120_000.0);
    }

    #[test]
    fn test_duration_beyond_cap_is_rejected() {
        assert!(matches!(
            sip(&SipInput::new(5_000.0, 12.0, 400_000_000)),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(lumpsum(&LumpsumInput::new(1_000.0, 12.0, 101)).is_err());
        assert!(sip_per_day(&SipGoalInput {
            target_amount: 1_000_000.0,
            annual_rate: 12.0,
            years: u32::MAX,
        })
        .is_err());
        assert!(step_up_sip(&StepUpSipInput {
            monthly_investment: 5_000.0,
            annual_rate: 12.0,
            years: 1_000,
            step_up: StepUp::Percent(10.0),
        })
        .is_err());
        assert!(sip(&SipInput::new(5_000.0, 12.0, 100)).is_ok());
    }
}
