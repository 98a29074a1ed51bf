//! Error types for the calculator engine

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the crate
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised by formulas, formatting and the scenario orchestrator
#[derive(Error, Debug)]
pub enum CalcError {
    /// A single numeric field is missing, non-numeric, or out of range
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// Combined report of every offending field in a request
    #[error("{0}")]
    Validation(ValidationError),

    /// Argument outside the domain of a conversion (e.g. negative words input)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Product tag not in the supported set
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Tax slab table is malformed
    #[error("Invalid tax slab table: {0}")]
    SlabTable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl CalcError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// One problem with one input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub problem: String,
}

/// All field problems found while validating a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn push(&mut self, field: &str, problem: impl Into<String>) {
        self.issues.push(FieldIssue {
            field: field.to_string(),
            problem: problem.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Convert into an error if any issue was recorded
    pub fn into_result(self) -> CalcResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CalcError::Validation(self))
        }
    }

    /// Whether a specific field was flagged
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.problem))
            .collect();
        write!(f, "Invalid input ({})", parts.join("; "))
    }
}

impl From<ValidationError> for CalcError {
    fn from(err: ValidationError) -> Self {
        CalcError::Validation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_summary_lists_every_field() {
        let mut err = ValidationError::default();
        err.push("rate", "must not be negative");
        err.push("years", "is required");

        let message = CalcError::from(err).to_string();
        assert_eq!(
            message,
            "Invalid input (rate: must not be negative; years: is required)"
        );
    }

    #[test]
    fn test_empty_validation_is_ok() {
        assert!(ValidationError::default().into_result().is_ok());
    }

    #[test]
    fn test_invalid_input_message() {
        let err = CalcError::invalid_input("principal", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid input 'principal': must be greater than zero"
        );
    }
}
