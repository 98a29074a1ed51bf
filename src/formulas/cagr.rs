//! Compound annual growth rate

use super::common::{ensure_period, ensure_positive};
use super::product::ProductType;
use super::result::{CagrMetrics, CalculationResult, Metrics, SeriesPoint};
use crate::error::CalcResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CagrInput {
    pub initial_value: f64,
    pub final_value: f64,
    /// Holding period; may be fractional but must be positive
    pub years: f64,
}

/// `CAGR = (final / initial)^(1 / years) - 1`, as a decimal
pub fn cagr_rate(initial_value: f64, final_value: f64, years: f64) -> f64 {
    (final_value / initial_value).powf(1.0 / years) - 1.0
}

/// CAGR with the implied growth path for whole years `0..=floor(years)`.
///
/// Profit is final minus initial and is negative for a loss. When `years`
/// is fractional the last point sits at `floor(years)` and falls short of
/// `maturity_amount`, which is reached only at the full holding period.
pub fn cagr(input: &CagrInput) -> CalcResult<CalculationResult> {
    ensure_positive("initial_value", input.initial_value)?;
    ensure_positive("final_value", input.final_value)?;
    ensure_period("years", input.years)?;

    let rate = cagr_rate(input.initial_value, input.final_value, input.years);
    let whole_years = input.years.floor() as u32;

    let series: Vec<SeriesPoint> = (0..=whole_years)
        .map(|year| {
            let value = input.initial_value * (1.0 + rate).powi(year as i32);
            SeriesPoint::new(year, input.initial_value, value)
        })
        .collect();

    let metrics = Metrics::Cagr(CagrMetrics {
        cagr_percent: rate * 100.0,
        absolute_return_percent: (input.final_value / input.initial_value - 1.0) * 100.0,
    });

    Ok(CalculationResult::from_totals(
        ProductType::Cagr,
        input.initial_value,
        input.final_value,
        metrics,
        series,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cagr_percent(result: &CalculationResult) -> f64 {
        match result.metrics {
            Metrics::Cagr(ref m) => m.cagr_percent,
            ref other => panic!("unexpected metrics {:?}", other),
        }
    }

    #[test]
    fn test_doubling_in_five_years() {
        let result = cagr(&CagrInput {
            initial_value: 100_000.0,
            final_value: 200_000.0,
            years: 5.0,
        })
        .unwrap();

        assert_relative_eq!(cagr_percent(&result), 14.869_835, epsilon = 1e-5);
        assert_eq!(result.profit, 100_000.0);
        assert_eq!(result.series.len(), 6);
        assert_eq!(result.series[0].period, 0);
        assert_eq!(result.series[0].value, 100_000.0);
    }

    #[test]
    fn test_series_reproduces_final_value() {
        for &(initial, final_value, years) in &[
            (10_000.0, 35_000.0, 7.0),
            (250_000.0, 180_000.0, 3.0),
            (1.0, 1_000.0, 20.0),
        ] {
            let result = cagr(&CagrInput {
                initial_value: initial,
                final_value,
                years,
            })
            .unwrap();
            let last = result.final_point().unwrap();
            assert_eq!(last.period, years as u32);
            assert!((last.value - final_value).abs() <= 1.0);
        }
    }

    #[test]
    fn test_loss_gives_negative_rate() {
        let result = cagr(&CagrInput {
            initial_value: 100_000.0,
            final_value: 80_000.0,
            years: 2.0,
        })
        .unwrap();
        assert!(cagr_percent(&result) < 0.0);
        assert_eq!(result.profit, -20_000.0);
    }

    #[test]
    fn test_fractional_years() {
        let result = cagr(&CagrInput {
            initial_value: 100_000.0,
            final_value: 150_000.0,
            years: 2.5,
        })
        .unwrap();
        assert_eq!(result.series.len(), 3);
        assert_relative_eq!(
            cagr_percent(&result) / 100.0,
            1.5_f64.powf(0.4) - 1.0,
            epsilon = 1e-12
        );

        // last whole year is two years in, half a year short of the total
        let last = result.final_point().unwrap();
        assert_eq!(last.period, 2);
        assert_relative_eq!(last.value, 100_000.0 * 1.5_f64.powf(0.8), epsilon = 1e-6);
        assert!(last.value < result.maturity_amount);
        assert_eq!(result.maturity_amount, 150_000.0);
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        let base = CagrInput {
            initial_value: 100.0,
            final_value: 200.0,
            years: 3.0,
        };
        assert!(cagr(&CagrInput { years: 0.0, ..base }).is_err());
        assert!(cagr(&CagrInput { initial_value: 0.0, ..base }).is_err());
        assert!(cagr(&CagrInput { final_value: -1.0, ..base }).is_err());
        assert!(cagr(&CagrInput { years: 1e12, ..base }).is_err());
    }
}
