//! Running state for month-by-month accumulation and drawdown

use super::common::{monthly_rate, MONTHS_PER_YEAR};

/// State of a corpus at a point in a monthly simulation
#[derive(Debug, Clone)]
pub struct MonthlyLedger {
    /// Current month (1-indexed, 0 before the first advance)
    pub month: u32,

    /// Year (1-indexed)
    pub year: u32,

    /// Month within year (1-12)
    pub month_in_year: u32,

    /// Balance after this month's flows
    pub balance: f64,

    /// Cumulative amount put in, including the opening balance
    pub invested: f64,

    /// Cumulative amount actually paid out
    pub withdrawn: f64,

    /// Monthly rate as a decimal
    rate: f64,
}

impl MonthlyLedger {
    /// Start a ledger with an opening balance and an annual rate in percent
    pub fn new(opening_balance: f64, annual_rate_percent: f64) -> Self {
        Self {
            month: 0,
            year: 1,
            month_in_year: 0,
            balance: opening_balance,
            invested: opening_balance,
            withdrawn: 0.0,
            rate: monthly_rate(annual_rate_percent),
        }
    }

    /// Advance timing to the next month
    pub fn advance_month(&mut self) {
        self.month += 1;
        self.year = (self.month - 1) / MONTHS_PER_YEAR + 1;
        self.month_in_year = (self.month - 1) % MONTHS_PER_YEAR + 1;
    }

    /// Contribution at the start of the month, then a month of growth
    pub fn contribute_and_grow(&mut self, contribution: f64) {
        self.balance = (self.balance + contribution) * (1.0 + self.rate);
        self.invested += contribution;
    }

    /// A month of growth, then a withdrawal at month end.
    ///
    /// Pays out at most what the balance holds and clamps the balance at
    /// zero. Returns the amount actually paid.
    pub fn grow_and_withdraw(&mut self, withdrawal: f64) -> f64 {
        let grown = self.balance * (1.0 + self.rate);
        let paid = withdrawal.min(grown).max(0.0);
        self.balance = (grown - paid).max(0.0);
        self.withdrawn += paid;
        paid
    }

    pub fn is_year_end(&self) -> bool {
        self.month_in_year == MONTHS_PER_YEAR
    }

    pub fn is_exhausted(&self) -> bool {
        self.balance <= 0.0
    }
}
