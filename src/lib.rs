//! Finance Calculator - Indian retail-investor financial math and formatting
//!
//! This library provides:
//! - Indian digit grouping (lakh/crore) and amounts in words
//! - Investment calculators (SIP, Lumpsum, Step-up SIP, SIP per day)
//! - Deposit calculators (FD, RD, PPF)
//! - Loan EMI with amortization, CAGR, retirement corpus and SWP
//! - Slab-based income tax for the new and old regimes
//! - A scenario runner that validates raw text inputs and dispatches by product

pub mod error;
pub mod format;
pub mod formulas;
pub mod inputs;
pub mod scenario;
pub mod tax;

// Re-export commonly used types
pub use error::{CalcError, CalcResult, ValidationError};
pub use format::{amount_in_words, format_indian_groups, format_rupees, parse_formatted_number, to_indian_words};
pub use formulas::{CalculationResult, Metrics, ProductType, SeriesPoint};
pub use inputs::{RawInputs, ScenarioRow};
pub use scenario::{run_calculation, ScenarioRunner};
pub use tax::TaxSlabTable;
