//! Loan EMI and amortization

use super::common::{
    ensure_months, ensure_non_negative, ensure_positive, monthly_rate, years_to_months,
    MONTHS_PER_YEAR,
};
use super::product::ProductType;
use super::result::{round_rupee, CalculationResult, LoanMetrics, Metrics, SeriesPoint};
use crate::error::CalcResult;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmiInput {
    pub loan_amount: f64,
    pub annual_rate: f64,
    pub tenure_months: u32,
}

impl EmiInput {
    /// Tenure given in whole years; fails if the tenure is too long
    pub fn from_years(loan_amount: f64, annual_rate: f64, years: u32) -> CalcResult<Self> {
        Ok(Self {
            loan_amount,
            annual_rate,
            tenure_months: years_to_months("tenure_years", years)?,
        })
    }
}

/// One month of the repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    pub month: u32,
    pub emi: f64,
    pub principal: f64,
    pub interest: f64,
    /// Outstanding after this month's payment
    pub balance: f64,
}

/// `EMI = P * r * (1+r)^n / ((1+r)^n - 1)`, or `P / n` at a zero rate.
///
/// Evaluated as `P * r / (1 - (1+r)^-n)`, which tends to `P * r` for very
/// long tenures instead of overflowing.
pub fn monthly_emi(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> f64 {
    if tenure_months == 0 {
        return 0.0;
    }
    let r = monthly_rate(annual_rate_percent);
    let n = f64::from(tenure_months);
    if r == 0.0 {
        return principal / n;
    }
    principal * r / (1.0 - (1.0 + r).powf(-n))
}

/// Month-by-month split of each instalment into interest and principal.
///
/// The final month repays whatever balance remains so the schedule closes
/// at exactly zero.
pub fn amortization_schedule(input: &EmiInput) -> CalcResult<Vec<AmortizationRow>> {
    validate(input)?;

    let r = monthly_rate(input.annual_rate);
    let emi = monthly_emi(input.loan_amount, input.annual_rate, input.tenure_months);
    let mut balance = input.loan_amount;
    let mut rows = Vec::with_capacity(input.tenure_months as usize);

    for month in 1..=input.tenure_months {
        let interest = balance * r;
        let principal = if month == input.tenure_months {
            balance
        } else {
            (emi - interest).min(balance)
        };
        balance = (balance - principal).max(0.0);

        rows.push(AmortizationRow {
            month,
            emi,
            principal,
            interest,
            balance,
        });
    }

    Ok(rows)
}

/// EMI with yearly buckets of principal repaid, interest paid and balance.
///
/// Totals: invested is the loan amount, maturity the total payable, profit
/// the total interest.
pub fn emi(input: &EmiInput) -> CalcResult<CalculationResult> {
    validate(input)?;

    if input.tenure_months == 0 {
        debug!("emi: zero tenure, returning empty series");
        return Ok(CalculationResult::zero_duration(ProductType::Emi, 0));
    }

    let schedule = amortization_schedule(input)?;
    let emi = schedule.first().map(|row| row.emi).unwrap_or(0.0);

    let mut series = Vec::new();
    let mut principal_paid = 0.0;
    let mut interest_paid = 0.0;

    for row in &schedule {
        principal_paid += row.principal;
        interest_paid += row.interest;

        let year_end = row.month % MONTHS_PER_YEAR == 0;
        if year_end || row.month == input.tenure_months {
            let year = (row.month - 1) / MONTHS_PER_YEAR + 1;
            let mut point = SeriesPoint::new(year, principal_paid, principal_paid + interest_paid);
            point.interest_paid = Some(interest_paid);
            point.balance = Some(row.balance);
            series.push(point);
        }
    }

    let total_payment = input.loan_amount + interest_paid;
    let metrics = Metrics::Loan(LoanMetrics {
        emi: round_rupee(emi),
        total_interest: round_rupee(interest_paid),
        total_payment: round_rupee(total_payment),
        tenure_months: input.tenure_months,
    });

    Ok(CalculationResult::from_totals(
        ProductType::Emi,
        input.loan_amount,
        total_payment,
        metrics,
        series,
    )
    .with_degenerate(input.annual_rate == 0.0))
}

fn validate(input: &EmiInput) -> CalcResult<()> {
    ensure_positive("loan_amount", input.loan_amount)?;
    ensure_non_negative("rate", input.annual_rate)?;
    ensure_months("tenure_months", input.tenure_months)
}
