//! Scenario runner: validate raw inputs and dispatch to a calculator
//!
//! Holds the tax slab tables once, then runs any number of calculations
//! against them. Every field problem in a request is collected and reported
//! together before anything is computed.

use crate::error::{CalcError, CalcResult, ValidationError};
use crate::formulas::{
    self, CagrInput, CalculationResult, EmiInput, FdInput, LumpsumInput, PpfInput, ProductType,
    RdInput, RetirementInput, SipGoalInput, SipInput, StepUp, StepUpSipInput, SwpInput, TaxInput,
    MAX_AGE, MAX_MONTHS, MAX_YEARS, MONTHS_PER_YEAR,
};
use crate::inputs::{RawInputs, ScenarioRow};
use crate::tax::{TaxSlabTable, DEFAULT_TAX_TABLE_PATH, NEW_REGIME, OLD_REGIME};
use log::debug;
use std::collections::BTreeMap;
use std::path::Path;

/// Run one calculation with the built-in tax tables
pub fn run_calculation(product: ProductType, inputs: &RawInputs) -> CalcResult<CalculationResult> {
    ScenarioRunner::new().run(product, inputs)
}

/// Pre-loaded runner for repeated calculations
///
/// # Example
/// ```
/// use finance_calculator::{RawInputs, ScenarioRunner};
/// use finance_calculator::formulas::ProductType;
///
/// let runner = ScenarioRunner::new();
/// let inputs = RawInputs::new()
///     .with("monthly_investment", "5,000")
///     .with("rate", "12")
///     .with("years", "10");
/// let result = runner.run(ProductType::Sip, &inputs).unwrap();
/// assert_eq!(result.invested_amount, 600_000.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Tax tables by regime name
    tax_tables: BTreeMap<String, TaxSlabTable>,

    /// Regime used when a tax request names none
    default_regime: String,
}

impl ScenarioRunner {
    /// Create runner with the built-in new and old regime tables
    pub fn new() -> Self {
        Self {
            tax_tables: BTreeMap::new(),
            default_regime: NEW_REGIME.to_string(),
        }
        .with_tax_table(TaxSlabTable::new_regime())
        .with_tax_table(TaxSlabTable::old_regime())
    }

    /// Create runner by loading tax tables from the default directory
    pub fn from_csv() -> CalcResult<Self> {
        Self::from_csv_path(Path::new(DEFAULT_TAX_TABLE_PATH))
    }

    /// Create runner by loading the new and old regime tables from `dir`
    pub fn from_csv_path(dir: &Path) -> CalcResult<Self> {
        let mut runner = Self {
            tax_tables: BTreeMap::new(),
            default_regime: NEW_REGIME.to_string(),
        };
        for regime in [NEW_REGIME, OLD_REGIME] {
            runner = runner.with_tax_table(TaxSlabTable::from_csv_path(dir, regime)?);
        }
        Ok(runner)
    }

    /// Add or replace a tax table (keyed by its name)
    pub fn with_tax_table(mut self, table: TaxSlabTable) -> Self {
        self.tax_tables.insert(table.name.clone(), table);
        self
    }

    pub fn tax_table(&self, regime: &str) -> Option<&TaxSlabTable> {
        self.tax_tables.get(regime)
    }

    /// Validate raw inputs for `product` and run the matching calculator
    pub fn run(&self, product: ProductType, inputs: &RawInputs) -> CalcResult<CalculationResult> {
        debug!("running {} with {} input fields", product, inputs.len());
        let mut fields = FieldReader::new(inputs);

        match product {
            ProductType::Sip => {
                let input = SipInput {
                    monthly_investment: fields.amount("monthly_investment"),
                    annual_rate: fields.rate("rate"),
                    years: fields.years("years"),
                };
                fields.finish()?;
                formulas::sip(&input)
            }
            ProductType::Lumpsum => {
                let input = LumpsumInput {
                    principal: fields.amount("principal"),
                    annual_rate: fields.rate("rate"),
                    years: fields.years("years"),
                };
                fields.finish()?;
                formulas::lumpsum(&input)
            }
            ProductType::Fd => {
                let input = FdInput {
                    principal: fields.amount("principal"),
                    annual_rate: fields.rate("rate"),
                    years: fields.years("years"),
                    compounding_per_year: fields
                        .optional_whole("compounding_per_year", MONTHS_PER_YEAR)
                        .unwrap_or(formulas::deposits::DEFAULT_FD_COMPOUNDING),
                };
                fields.finish()?;
                formulas::fd(&input)
            }
            ProductType::Rd => {
                let input = RdInput {
                    monthly_deposit: fields.amount("monthly_deposit"),
                    annual_rate: fields.rate("rate"),
                    years: fields.years("years"),
                };
                fields.finish()?;
                formulas::rd(&input)
            }
            ProductType::Ppf => {
                let input = PpfInput {
                    yearly_deposit: fields.amount("yearly_deposit"),
                    annual_rate: fields.rate("rate"),
                    years: fields.years("years"),
                };
                fields.finish()?;
                formulas::ppf(&input)
            }
            ProductType::Emi => {
                let loan_amount = fields.amount("loan_amount");
                let annual_rate = fields.rate("rate");
                let months = fields.optional_whole("tenure_months", MAX_MONTHS);
                let years = fields.optional_whole("tenure_years", MAX_YEARS);
                let tenure_months = match (months, years) {
                    (Some(_), Some(_)) => {
                        fields.flag("tenure_months", "give either tenure_months or tenure_years, not both");
                        0
                    }
                    (Some(m), None) => m,
                    (None, Some(y)) => y * MONTHS_PER_YEAR,
                    (None, None) => {
                        fields.require("tenure_years");
                        0
                    }
                };
                fields.finish()?;
                formulas::emi(&EmiInput {
                    loan_amount,
                    annual_rate,
                    tenure_months,
                })
            }
            ProductType::Cagr => {
                let input = CagrInput {
                    initial_value: fields.amount("initial_value"),
                    final_value: fields.amount("final_value"),
                    years: fields.bounded("years", Rule::Positive, f64::from(MAX_YEARS)),
                };
                fields.finish()?;
                formulas::cagr(&input)
            }
            ProductType::Retirement => {
                let input = RetirementInput {
                    current_age: fields.whole("current_age", MAX_AGE),
                    retirement_age: fields.whole("retirement_age", MAX_AGE),
                    current_savings: fields.optional_non_negative("current_savings"),
                    monthly_contribution: fields.optional_non_negative("monthly_contribution"),
                    annual_rate: fields.rate("rate"),
                    inflation_rate: fields.optional_non_negative("inflation"),
                };
                let plan_fields = [
                    "current_age",
                    "retirement_age",
                    "current_savings",
                    "monthly_contribution",
                ];
                if !plan_fields.iter().any(|field| fields.has_issue(field)) {
                    fields.merge(input.plan_issues());
                }
                fields.finish()?;
                formulas::retirement(&input)
            }
            ProductType::Swp => {
                let input = SwpInput {
                    total_investment: fields.amount("total_investment"),
                    monthly_withdrawal: fields.amount("monthly_withdrawal"),
                    annual_rate: fields.rate("rate"),
                    years: fields.years("years"),
                };
                fields.finish()?;
                formulas::swp(&input)
            }
            ProductType::StepUpSip => {
                let monthly_investment = fields.amount("monthly_investment");
                let annual_rate = fields.rate("rate");
                let years = fields.years("years");
                let percent = fields.optional("step_up_percent", Rule::NonNegative);
                let amount = fields.optional("step_up_amount", Rule::NonNegative);
                let step_up = fields
                    .check(StepUp::from_parts(percent, amount))
                    .unwrap_or(StepUp::Percent(0.0));
                fields.finish()?;
                formulas::step_up_sip(&StepUpSipInput {
                    monthly_investment,
                    annual_rate,
                    years,
                    step_up,
                })
            }
            ProductType::SipPerDay => {
                let input = SipGoalInput {
                    target_amount: fields.amount("target_amount"),
                    annual_rate: fields.rate("rate"),
                    years: fields.years("years"),
                };
                fields.finish()?;
                formulas::sip_per_day(&input)
            }
            ProductType::Tax => {
                let input = TaxInput {
                    income: fields.amount("income"),
                    deductions: fields.optional_non_negative("deductions"),
                };
                let regime = inputs.get("regime").unwrap_or(self.default_regime.as_str());
                let table = self.tax_tables.get(regime);
                if table.is_none() {
                    fields.flag("regime", format!("unknown tax regime '{regime}'"));
                }
                fields.finish()?;
                match table {
                    Some(table) => formulas::income_tax(&input, table),
                    None => Err(CalcError::invalid_input("regime", "unknown tax regime")),
                }
            }
        }
    }

    /// Run a batch of scenarios in order
    pub fn run_batch(&self, rows: &[ScenarioRow]) -> Vec<CalcResult<CalculationResult>> {
        rows.iter().map(|row| self.run(row.product, &row.inputs)).collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Rule {
    Positive,
    NonNegative,
}

/// Reads numeric fields and records every problem instead of stopping at the
/// first. Fields with problems read as zero; `finish` must be checked before
/// the values are used.
struct FieldReader<'a> {
    inputs: &'a RawInputs,
    issues: ValidationError,
}

impl<'a> FieldReader<'a> {
    fn new(inputs: &'a RawInputs) -> Self {
        Self {
            inputs,
            issues: ValidationError::default(),
        }
    }

    fn flag(&mut self, field: &str, problem: impl Into<String>) {
        self.issues.push(field, problem);
    }

    fn require(&mut self, field: &str) {
        self.flag(field, "is required");
    }

    fn has_issue(&self, field: &str) -> bool {
        self.issues.has_field(field)
    }

    fn merge(&mut self, other: ValidationError) {
        self.issues.issues.extend(other.issues);
    }

    /// Record a calculator-side rejection alongside the field issues
    fn check<T>(&mut self, result: CalcResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(CalcError::InvalidInput { field, reason }) => {
                self.flag(&field, reason);
                None
            }
            Err(CalcError::Validation(issues)) => {
                self.merge(issues);
                None
            }
            Err(other) => {
                self.flag("inputs", other.to_string());
                None
            }
        }
    }

    fn optional(&mut self, field: &str, rule: Rule) -> Option<f64> {
        let value = match self.inputs.number(field)? {
            Some(value) => value,
            None => {
                self.flag(field, "is not a number");
                return None;
            }
        };
        match rule {
            Rule::Positive if value <= 0.0 => {
                self.flag(field, "must be greater than zero");
                None
            }
            Rule::NonNegative if value < 0.0 => {
                self.flag(field, "must not be negative");
                None
            }
            _ => Some(value),
        }
    }

    fn required(&mut self, field: &str, rule: Rule) -> f64 {
        if self.inputs.get(field).is_none() {
            self.require(field);
            return 0.0;
        }
        self.optional(field, rule).unwrap_or(0.0)
    }

    fn bounded(&mut self, field: &str, rule: Rule, max: f64) -> f64 {
        let value = self.required(field, rule);
        if value > max {
            self.flag(field, format!("must be at most {max}"));
            return 0.0;
        }
        value
    }

    fn amount(&mut self, field: &str) -> f64 {
        self.required(field, Rule::Positive)
    }

    fn rate(&mut self, field: &str) -> f64 {
        self.required(field, Rule::NonNegative)
    }

    fn optional_non_negative(&mut self, field: &str) -> f64 {
        self.optional(field, Rule::NonNegative).unwrap_or(0.0)
    }

    fn to_whole(&mut self, field: &str, value: f64, max: u32) -> Option<u32> {
        if value.fract() != 0.0 {
            self.flag(field, "must be a whole number");
            None
        } else if value > f64::from(max) {
            self.flag(field, format!("must be at most {max}"));
            None
        } else {
            Some(value as u32)
        }
    }

    fn whole(&mut self, field: &str, max: u32) -> u32 {
        if self.inputs.get(field).is_none() {
            self.require(field);
            return 0;
        }
        self.optional_whole(field, max).unwrap_or(0)
    }

    fn optional_whole(&mut self, field: &str, max: u32) -> Option<u32> {
        let value = self.optional(field, Rule::NonNegative)?;
        self.to_whole(field, value, max)
    }

    /// Whole-year duration; zero is allowed and yields an empty plan
    fn years(&mut self, field: &str) -> u32 {
        self.whole(field, MAX_YEARS)
    }

    fn finish(self) -> CalcResult<()> {
        self.issues.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::Metrics;
    use crate::inputs::loader::read_scenarios;

    fn issues(err: CalcError) -> ValidationError {
        match err {
            CalcError::Validation(v) => v,
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_sip_end_to_end() {
        let inputs = RawInputs::new()
            .with("monthly_investment", "5,000")
            .with("rate", "12")
            .with("years", "10");
        let result = run_calculation(ProductType::Sip, &inputs).unwrap();
        assert_eq!(result.invested_amount, 600_000.0);
        assert_eq!(result.maturity_amount, 1_161_695.0);
        assert_eq!(result.profit, 561_695.0);
    }

    #[test]
    fn test_lumpsum_end_to_end() {
        let inputs = RawInputs::new()
            .with("principal", "1,00,000")
            .with("rate", "12")
            .with("years", "10");
        let result = run_calculation(ProductType::Lumpsum, &inputs).unwrap();
        assert_eq!(result.maturity_amount, 330_039.0);
    }

    #[test]
    fn test_fd_end_to_end() {
        let inputs = RawInputs::new()
            .with("principal", "1,00,000")
            .with("rate", "7")
            .with("years", "5");
        let result = run_calculation(ProductType::Fd, &inputs).unwrap();
        assert_eq!(result.maturity_amount, 141_478.0);
    }

    #[test]
    fn test_zero_rate_degenerates_for_accumulators() {
        let cases = [
            (ProductType::Sip, "monthly_investment"),
            (ProductType::Lumpsum, "principal"),
            (ProductType::Fd, "principal"),
            (ProductType::Rd, "monthly_deposit"),
        ];
        for (product, amount_field) in cases {
            let inputs = RawInputs::new()
                .with(amount_field, "2,500")
                .with("rate", "0")
                .with("years", "4");
            let result = run_calculation(product, &inputs).unwrap();
            assert_eq!(result.maturity_amount, result.invested_amount, "{product}");
            assert!(result.degenerate);
        }
    }

    #[test]
    fn test_zero_years_gives_single_point() {
        let inputs = RawInputs::new()
            .with("monthly_investment", "5000")
            .with("rate", "12")
            .with("years", "0");
        let result = run_calculation(ProductType::Sip, &inputs).unwrap();
        assert_eq!(result.series.len(), 1);
        assert!(result.degenerate);
    }

    #[test]
    fn test_all_problems_reported_together() {
        let inputs = RawInputs::new()
            .with("monthly_investment", "-5")
            .with("rate", "abc")
            .with("years", "2.5");
        let err = issues(run_calculation(ProductType::Sip, &inputs).unwrap_err());
        assert_eq!(err.issues.len(), 3);
        assert!(err.has_field("monthly_investment"));
        assert!(err.has_field("rate"));
        assert!(err.has_field("years"));
    }

    #[test]
    fn test_missing_fields() {
        let err = issues(run_calculation(ProductType::Swp, &RawInputs::new()).unwrap_err());
        for field in ["total_investment", "monthly_withdrawal", "rate", "years"] {
            assert!(err.has_field(field), "{field} not flagged");
        }
        assert!(err.to_string().contains("total_investment: is required"));
    }

    #[test]
    fn test_duration_upper_bound() {
        let inputs = RawInputs::new()
            .with("principal", "1000")
            .with("rate", "5")
            .with("years", "500");
        let err = issues(run_calculation(ProductType::Lumpsum, &inputs).unwrap_err());
        assert!(err.has_field("years"));
    }

    #[test]
    fn test_emi_tenure_in_months_or_years() {
        let by_years = RawInputs::new()
            .with("loan_amount", "10,00,000")
            .with("rate", "8.5")
            .with("tenure_years", "20");
        let by_months = RawInputs::new()
            .with("loan_amount", "10,00,000")
            .with("rate", "8.5")
            .with("tenure_months", "240");
        let a = run_calculation(ProductType::Emi, &by_years).unwrap();
        let b = run_calculation(ProductType::Emi, &by_months).unwrap();
        assert_eq!(a, b);

        let both = by_years.clone().with("tenure_months", "240");
        let err = issues(run_calculation(ProductType::Emi, &both).unwrap_err());
        assert!(err.has_field("tenure_months"));

        let neither = RawInputs::new().with("loan_amount", "100000").with("rate", "9");
        let err = issues(run_calculation(ProductType::Emi, &neither).unwrap_err());
        assert!(err.has_field("tenure_years"));
    }

    #[test]
    fn test_cagr_fractional_years() {
        let inputs = RawInputs::new()
            .with("initial_value", "1,00,000")
            .with("final_value", "1,50,000")
            .with("years", "2.5");
        let result = run_calculation(ProductType::Cagr, &inputs).unwrap();
        assert!(matches!(result.metrics, Metrics::Cagr(_)));
        assert_eq!(result.series.len(), 3);
    }

    #[test]
    fn test_retirement_defaults_optional_fields() {
        let inputs = RawInputs::new()
            .with("current_age", "30")
            .with("retirement_age", "60")
            .with("monthly_contribution", "10,000")
            .with("rate", "10");
        let result = run_calculation(ProductType::Retirement, &inputs).unwrap();
        assert_eq!(result.invested_amount, 3_600_000.0);
        match result.metrics {
            // no inflation given: real corpus equals nominal
            Metrics::Retirement(ref m) => {
                assert_eq!(m.inflation_adjusted_corpus, result.maturity_amount)
            }
            ref other => panic!("unexpected metrics {:?}", other),
        }
    }

    #[test]
    fn test_step_up_both_kinds_rejected() {
        let inputs = RawInputs::new()
            .with("monthly_investment", "5000")
            .with("rate", "12")
            .with("years", "10")
            .with("step_up_percent", "10")
            .with("step_up_amount", "500");
        let err = issues(run_calculation(ProductType::StepUpSip, &inputs).unwrap_err());
        assert!(err.has_field("step_up_amount"));

        // reported together with ordinary field problems
        let with_bad_rate = inputs.with("rate", "abc");
        let err = issues(run_calculation(ProductType::StepUpSip, &with_bad_rate).unwrap_err());
        assert_eq!(err.issues.len(), 2);
        assert!(err.has_field("rate"));
        assert!(err.has_field("step_up_amount"));
    }

    #[test]
    fn test_retirement_plan_rules_join_field_issues() {
        let inputs = RawInputs::new()
            .with("current_age", "50")
            .with("retirement_age", "40")
            .with("rate", "-3");
        let err = issues(run_calculation(ProductType::Retirement, &inputs).unwrap_err());
        assert_eq!(err.issues.len(), 3);
        assert!(err.has_field("rate"));
        assert!(err.has_field("retirement_age"));
        assert!(err.has_field("monthly_contribution"));

        // a bad age is reported once, without knock-on plan complaints
        let bad_age = RawInputs::new()
            .with("current_age", "thirty")
            .with("retirement_age", "60")
            .with("monthly_contribution", "10000")
            .with("rate", "10");
        let err = issues(run_calculation(ProductType::Retirement, &bad_age).unwrap_err());
        assert_eq!(err.issues.len(), 1);
        assert!(err.has_field("current_age"));
    }

    #[test]
    fn test_tax_regimes() {
        let runner = ScenarioRunner::new();
        let new_regime = RawInputs::new().with("income", "12,00,000");
        let result = runner.run(ProductType::Tax, &new_regime).unwrap();
        assert_eq!(result.profit, -83_200.0);

        let old_regime = RawInputs::new()
            .with("income", "11,50,000")
            .with("deductions", "1,50,000")
            .with("regime", "old");
        let result = runner.run(ProductType::Tax, &old_regime).unwrap();
        assert_eq!(result.profit, -117_000.0);

        let unknown = RawInputs::new().with("income", "500000").with("regime", "flat");
        let err = issues(runner.run(ProductType::Tax, &unknown).unwrap_err());
        assert!(err.has_field("regime"));
    }

    #[test]
    fn test_injected_tax_table() {
        use crate::tax::TaxSlab;

        let flat = TaxSlabTable::new(
            "flat",
            vec![TaxSlab::new(0.0, None, 10.0)],
            0.0,
        )
        .unwrap();
        let runner = ScenarioRunner::new().with_tax_table(flat);
        let inputs = RawInputs::new().with("income", "100000").with("regime", "flat");
        let result = runner.run(ProductType::Tax, &inputs).unwrap();
        assert_eq!(result.profit, -10_000.0);
    }

    #[test]
    fn test_runner_from_bundled_tables() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_TAX_TABLE_PATH);
        let runner = ScenarioRunner::from_csv_path(&dir).unwrap();
        assert_eq!(runner.tax_table(NEW_REGIME), Some(&TaxSlabTable::new_regime()));
        assert!(runner.tax_table(OLD_REGIME).is_some());
    }

    #[test]
    fn test_run_batch_keeps_order() {
        let csv = "\
id,product,monthly_investment,principal,rate,years
1,sip,5000,,12,10
2,lumpsum,,100000,12,10
3,sip,,,12,10
";
        let rows = read_scenarios(csv.as_bytes()).unwrap();
        let results = ScenarioRunner::new().run_batch(&rows);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().product, ProductType::Sip);
        assert_eq!(results[1].as_ref().unwrap().maturity_amount, 330_039.0);
        assert!(results[2].is_err());
    }

    #[test]
    fn test_bundled_sample_runs_clean() {
        use crate::inputs::{load_scenarios, loader::DEFAULT_SCENARIO_PATH};

        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_SCENARIO_PATH);
        let rows = load_scenarios(&path).unwrap();
        let results = ScenarioRunner::new().run_batch(&rows);
        for (row, result) in rows.iter().zip(&results) {
            assert!(result.is_ok(), "{}: {:?}", row.id, result);
        }
    }

    #[test]
    fn test_same_inputs_same_result() {
        let inputs = RawInputs::new()
            .with("total_investment", "10,00,000")
            .with("monthly_withdrawal", "10,000")
            .with("rate", "8")
            .with("years", "10");
        let a = run_calculation(ProductType::Swp, &inputs).unwrap();
        let b = run_calculation(ProductType::Swp, &inputs).unwrap();
        assert_eq!(a, b);
    }
}
