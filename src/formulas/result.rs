//! Calculation output structures

use super::product::ProductType;
use crate::tax::SlabTax;
use serde::{Deserialize, Serialize};

/// One point of a yearly (or by-age) series
///
/// Values keep full precision; rounding happens only in the totals and at
/// render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Year number (1-indexed), year offset for CAGR, or age for retirement
    #[serde(rename = "year")]
    pub period: u32,

    /// Amount put in so far (principal repaid, for loans)
    pub invested: f64,

    /// Value at this point (amount paid so far, for loans)
    #[serde(rename = "total")]
    pub value: f64,

    /// Cumulative interest paid (loans)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_paid: Option<f64>,

    /// Outstanding loan balance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,

    /// Value in today's money (retirement)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation_adjusted: Option<f64>,

    /// Cumulative withdrawals (SWP)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_withdrawn: Option<f64>,

    /// Monthly instalment in force during this year (step-up SIP)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_sip: Option<f64>,
}

impl SeriesPoint {
    pub fn new(period: u32, invested: f64, value: f64) -> Self {
        Self {
            period,
            invested,
            value,
            interest_paid: None,
            balance: None,
            inflation_adjusted: None,
            total_withdrawn: None,
            monthly_sip: None,
        }
    }

    /// Gain at this point
    pub fn gain(&self) -> f64 {
        self.value - self.invested
    }
}

/// Loan metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanMetrics {
    pub emi: f64,
    pub total_interest: f64,
    pub total_payment: f64,
    pub tenure_months: u32,
}

/// CAGR metrics (percentages, unrounded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CagrMetrics {
    pub cagr_percent: f64,
    pub absolute_return_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementMetrics {
    pub inflation_adjusted_corpus: f64,
    pub years_to_retirement: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalMetrics {
    pub total_withdrawn: f64,
    pub final_balance: f64,
    /// Month in which the corpus ran out, if it did
    pub depleted_in_month: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepUpMetrics {
    pub final_monthly_sip: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalMetrics {
    pub monthly_investment: f64,
    pub daily_saving: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxMetrics {
    pub regime: String,
    pub taxable_income: f64,
    pub tax_before_cess: f64,
    pub cess: f64,
    pub total_tax: f64,
    pub effective_rate_percent: f64,
    pub breakdown: Vec<SlabTax>,
}

/// Product-specific figures carried next to the common totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Metrics {
    Plain,
    Loan(LoanMetrics),
    Cagr(CagrMetrics),
    Retirement(RetirementMetrics),
    Withdrawal(WithdrawalMetrics),
    StepUp(StepUpMetrics),
    Goal(GoalMetrics),
    Tax(TaxMetrics),
}

/// Complete result of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub product: ProductType,

    /// Total invested, rounded to the rupee
    pub invested_amount: f64,

    /// Maturity / final value, rounded to the rupee
    pub maturity_amount: f64,

    /// `maturity_amount - invested_amount`
    pub profit: f64,

    pub metrics: Metrics,

    #[serde(rename = "yearlyPoints")]
    pub series: Vec<SeriesPoint>,

    /// Set when a zero rate or zero duration took the trivial branch
    #[serde(default)]
    pub degenerate: bool,
}

impl CalculationResult {
    /// Build a result, rounding the totals to whole rupees
    pub fn from_totals(
        product: ProductType,
        invested: f64,
        maturity: f64,
        metrics: Metrics,
        series: Vec<SeriesPoint>,
    ) -> Self {
        let invested_amount = round_rupee(invested);
        let maturity_amount = round_rupee(maturity);
        Self {
            product,
            invested_amount,
            maturity_amount,
            profit: maturity_amount - invested_amount,
            metrics,
            series,
            degenerate: false,
        }
    }

    /// Zero-duration result: a single zeroed point at `period`
    pub fn zero_duration(product: ProductType, period: u32) -> Self {
        Self {
            product,
            invested_amount: 0.0,
            maturity_amount: 0.0,
            profit: 0.0,
            metrics: Metrics::Plain,
            series: vec![SeriesPoint::new(period, 0.0, 0.0)],
            degenerate: true,
        }
    }

    /// Mark the result as produced by a degenerate branch
    pub fn with_degenerate(mut self, degenerate: bool) -> Self {
        self.degenerate = degenerate;
        self
    }

    pub fn final_point(&self) -> Option<&SeriesPoint> {
        self.series.last()
    }
}

/// Round a currency figure to the nearest rupee
pub fn round_rupee(amount: f64) -> f64 {
    let rounded = amount.round();
    // avoid "-0" in output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
