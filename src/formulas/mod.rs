//! Pure calculators, one function per product
//!
//! Every calculator takes a typed input struct and returns a
//! [`CalculationResult`]: totals rounded to the rupee plus a yearly series
//! kept at full precision. Amount fields must be positive; a zero rate takes
//! an explicit linear branch and a zero duration returns a single zeroed
//! point. Durations are capped at [`MAX_YEARS`].

mod common;
mod product;
mod result;
mod state;

pub mod cagr;
pub mod deposits;
pub mod growth;
pub mod loan;
pub mod retirement;
pub mod swp;
pub mod tax;

pub use common::{
    annuity_due_factor, growth_factor, monthly_rate, sip_future_value, MAX_AGE, MAX_MONTHS,
    MAX_YEARS, MONTHS_PER_YEAR,
};
pub use product::ProductType;
pub use result::{
    round_rupee, CagrMetrics, CalculationResult, GoalMetrics, LoanMetrics, Metrics,
    RetirementMetrics, SeriesPoint, StepUpMetrics, TaxMetrics, WithdrawalMetrics,
};
pub use state::MonthlyLedger;

pub use cagr::{cagr, CagrInput};
pub use deposits::{fd, ppf, rd, FdInput, PpfInput, RdInput};
pub use growth::{
    lumpsum, sip, sip_per_day, step_up_sip, LumpsumInput, SipGoalInput, SipInput, StepUp,
    StepUpSipInput,
};
pub use loan::{amortization_schedule, emi, monthly_emi, AmortizationRow, EmiInput};
pub use retirement::{retirement, RetirementInput};
pub use swp::{swp, SwpInput};
pub use tax::{income_tax, TaxInput};
