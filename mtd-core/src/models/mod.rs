mod quarter;
mod quarter_period;
mod quarter_status;
mod tax_year;

use thiserror::Error;

pub use quarter::Quarter;
pub use quarter_period::QuarterPeriod;
pub use quarter_status::{QuarterStatus, StatusStyle};
pub use tax_year::TaxYear;

/// Errors from parsing tax periods out of text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxPeriodError {
    #[error("invalid tax year '{0}'; expected e.g. 2025 or 2025/26")]
    InvalidTaxYear(String),

    #[error("invalid quarter '{0}'; expected Q1, Q2, Q3 or Q4")]
    InvalidQuarter(String),
}
