//! Supported calculator products

use crate::error::CalcError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of calculators the engine can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    /// Monthly systematic investment
    Sip,
    /// One-time investment, monthly compounding
    Lumpsum,
    /// Fixed deposit, quarterly compounding by default
    Fd,
    /// Recurring deposit
    Rd,
    /// Public Provident Fund, annual deposits
    Ppf,
    /// Loan instalment with amortization
    Emi,
    /// Compound annual growth rate
    Cagr,
    /// Retirement corpus with inflation adjustment
    Retirement,
    /// Systematic withdrawal plan
    Swp,
    /// SIP with yearly step-up
    StepUpSip,
    /// Required SIP (and daily saving) for a target amount
    SipPerDay,
    /// Slab-based income tax
    Tax,
}

impl ProductType {
    pub const ALL: [ProductType; 12] = [
        ProductType::Sip,
        ProductType::Lumpsum,
        ProductType::Fd,
        ProductType::Rd,
        ProductType::Ppf,
        ProductType::Emi,
        ProductType::Cagr,
        ProductType::Retirement,
        ProductType::Swp,
        ProductType::StepUpSip,
        ProductType::SipPerDay,
        ProductType::Tax,
    ];

    /// Tag used in CLI arguments, CSV files and JSON requests
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Sip => "sip",
            ProductType::Lumpsum => "lumpsum",
            ProductType::Fd => "fd",
            ProductType::Rd => "rd",
            ProductType::Ppf => "ppf",
            ProductType::Emi => "emi",
            ProductType::Cagr => "cagr",
            ProductType::Retirement => "retirement",
            ProductType::Swp => "swp",
            ProductType::StepUpSip => "step-up-sip",
            ProductType::SipPerDay => "sip-per-day",
            ProductType::Tax => "tax",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase().replace('_', "-");
        ProductType::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == tag)
            .ok_or_else(|| CalcError::UnknownProduct(s.to_string()))
    }
}
