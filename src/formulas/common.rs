//! Shared compounding helpers and input checks

use crate::error::{CalcError, CalcResult};

pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest whole-year duration any calculator accepts
pub const MAX_YEARS: u32 = 100;

/// `MAX_YEARS` in months, for loan tenures
pub const MAX_MONTHS: u32 = MAX_YEARS * MONTHS_PER_YEAR;

/// Oldest age accepted for retirement planning
pub const MAX_AGE: u32 = 120;

/// Monthly rate as a decimal from an annual percentage (12.0 -> 0.01)
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 12.0 / 100.0
}

/// Future value of `periods` payments of 1 made at the start of each period.
///
/// `((1 + i)^n - 1) / i * (1 + i)`, which is undefined at `i == 0`; the zero
/// rate case is linear accumulation.
pub fn annuity_due_factor(rate: f64, periods: u32) -> f64 {
    if rate == 0.0 {
        return periods as f64;
    }
    ((1.0 + rate).powi(periods as i32) - 1.0) / rate * (1.0 + rate)
}

/// Growth factor `(1 + i)^n`
pub fn growth_factor(rate: f64, periods: u32) -> f64 {
    if rate == 0.0 {
        return 1.0;
    }
    (1.0 + rate).powi(periods as i32)
}

/// SIP maturity for a monthly instalment after `months` payments
pub fn sip_future_value(monthly_amount: f64, annual_rate_percent: f64, months: u32) -> f64 {
    monthly_amount * annuity_due_factor(monthly_rate(annual_rate_percent), months)
}

pub fn ensure_finite(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, "must be a finite number"))
    }
}

/// Amount fields: strictly positive
pub fn ensure_positive(field: &str, value: f64) -> CalcResult<()> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, "must be greater than zero"));
    }
    Ok(())
}

/// Rates and optional amounts: zero allowed, negative rejected
pub fn ensure_non_negative(field: &str, value: f64) -> CalcResult<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, "must not be negative"));
    }
    Ok(())
}

/// Whole-year durations: zero allowed, at most `MAX_YEARS`
pub fn ensure_years(field: &str, years: u32) -> CalcResult<()> {
    if years > MAX_YEARS {
        return Err(CalcError::invalid_input(
            field,
            format!("must be at most {} years", MAX_YEARS),
        ));
    }
    Ok(())
}

/// Month-counted tenures: zero allowed, at most `MAX_MONTHS`
pub fn ensure_months(field: &str, months: u32) -> CalcResult<()> {
    if months > MAX_MONTHS {
        return Err(CalcError::invalid_input(
            field,
            format!("must be at most {} months", MAX_MONTHS),
        ));
    }
    Ok(())
}

/// Fractional holding periods: strictly positive, at most `MAX_YEARS`
pub fn ensure_period(field: &str, years: f64) -> CalcResult<()> {
    ensure_positive(field, years)?;
    if years > MAX_YEARS as f64 {
        return Err(CalcError::invalid_input(
            field,
            format!("must be at most {} years", MAX_YEARS),
        ));
    }
    Ok(())
}

/// Whole months in `years`, rejecting durations beyond `MAX_YEARS`
pub fn years_to_months(field: &str, years: u32) -> CalcResult<u32> {
    ensure_years(field, years)?;
    years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| CalcError::invalid_input(field, "duration too long"))
}
