//! Systematic withdrawal plan

use super::common::{ensure_non_negative, ensure_positive, ensure_years, MONTHS_PER_YEAR};
use super::product::ProductType;
use super::result::{round_rupee, CalculationResult, Metrics, SeriesPoint, WithdrawalMetrics};
use super::state::MonthlyLedger;
use crate::error::CalcResult;
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwpInput {
    pub total_investment: f64,
    pub monthly_withdrawal: f64,
    pub annual_rate: f64,
    pub years: u32,
}

/// Monthly drawdown: the corpus grows a month, then the withdrawal is paid.
///
/// Once the corpus runs out the balance stays at zero and later withdrawals
/// pay nothing. Profit counts withdrawals: `final + withdrawn - invested`.
pub fn swp(input: &SwpInput) -> CalcResult<CalculationResult> {
    ensure_positive("total_investment", input.total_investment)?;
    ensure_positive("monthly_withdrawal", input.monthly_withdrawal)?;
    ensure_non_negative("rate", input.annual_rate)?;
    ensure_years("years", input.years)?;

    if input.years == 0 {
        debug!("swp: zero duration, returning empty series");
        return Ok(CalculationResult::zero_duration(ProductType::Swp, 0));
    }

    let mut ledger = MonthlyLedger::new(input.total_investment, input.annual_rate);
    let mut depleted_in_month = None;
    let mut series = Vec::with_capacity(input.years as usize);

    for _ in 0..input.years * MONTHS_PER_YEAR {
        ledger.advance_month();
        ledger.grow_and_withdraw(input.monthly_withdrawal);

        if depleted_in_month.is_none() && ledger.is_exhausted() {
            warn!(
                "swp: corpus of {:.0} exhausted in month {}",
                input.total_investment, ledger.month
            );
            depleted_in_month = Some(ledger.month);
        }

        if ledger.is_year_end() {
            let mut point = SeriesPoint::new(ledger.year, input.total_investment, ledger.balance);
            point.total_withdrawn = Some(ledger.withdrawn);
            series.push(point);
        }
    }

    let metrics = Metrics::Withdrawal(WithdrawalMetrics {
        total_withdrawn: round_rupee(ledger.withdrawn),
        final_balance: round_rupee(ledger.balance),
        depleted_in_month,
    });

    let mut result = CalculationResult::from_totals(
        ProductType::Swp,
        input.total_investment,
        ledger.balance,
        metrics,
        series,
    )
    .with_degenerate(input.annual_rate == 0.0);
    result.profit = result.maturity_amount + round_rupee(ledger.withdrawn) - result.invested_amount;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn withdrawal(result: &CalculationResult) -> WithdrawalMetrics {
        match result.metrics {
            Metrics::Withdrawal(ref m) => m.clone(),
            ref other => panic!("unexpected metrics {:?}", other),
        }
    }

    #[test]
    fn test_sustainable_withdrawal() {
        let result = swp(&SwpInput {
            total_investment: 1_000_000.0,
            monthly_withdrawal: 10_000.0,
            annual_rate: 8.0,
            years: 10,
        })
        .unwrap();

        let m = withdrawal(&result);
        assert_eq!(m.total_withdrawn, 1_200_000.0);
        assert_eq!(m.final_balance, 390_180.0);
        assert_eq!(m.depleted_in_month, None);
        assert_eq!(result.maturity_amount, 390_180.0);
        assert_eq!(result.profit, 590_180.0);
        assert_eq!(result.series.len(), 10);
    }

    #[test]
    fn test_balance_clamps_at_zero() {
        let result = swp(&SwpInput {
            total_investment: 500_000.0,
            monthly_withdrawal: 10_000.0,
            annual_rate: 8.0,
            years: 10,
        })
        .unwrap();

        let m = withdrawal(&result);
        assert_eq!(m.depleted_in_month, Some(62));
        assert_eq!(m.final_balance, 0.0);
        assert_eq!(m.total_withdrawn, 610_223.0);
        assert!(result.series.iter().all(|p| p.value >= 0.0));
    }

    #[test]
    fn test_balance_non_increasing_when_withdrawal_exceeds_growth() {
        let result = swp(&SwpInput {
            total_investment: 1_000_000.0,
            monthly_withdrawal: 10_000.0,
            annual_rate: 8.0,
            years: 10,
        })
        .unwrap();
        for pair in result.series.windows(2) {
            assert!(pair[1].value <= pair[0].value);
            assert!(pair[1].total_withdrawn >= pair[0].total_withdrawn);
        }
    }

    #[test]
    fn test_zero_rate_drawdown() {
        let result = swp(&SwpInput {
            total_investment: 120_000.0,
            monthly_withdrawal: 1_000.0,
            annual_rate: 0.0,
            years: 5,
        })
        .unwrap();
        assert_eq!(result.maturity_amount, 60_000.0);
        assert_eq!(result.profit, 0.0);
    }

    #[test]
    fn test_requires_withdrawal() {
        assert!(swp(&SwpInput {
            total_investment: 120_000.0,
            monthly_withdrawal: 0.0,
            annual_rate: 8.0,
            years: 5,
        })
        .is_err());
    }

    #[test]
    fn test_duration_beyond_cap_is_rejected() {
        let result = swp(&SwpInput {
            total_investment: 1_000_000.0,
            monthly_withdrawal: 10_000.0,
            annual_rate: 8.0,
            years: 400_000_000,
        });
        assert!(result.is_err());
    }
}
