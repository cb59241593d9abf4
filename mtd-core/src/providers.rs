//! Financial data sources consumed by the status engine.
//!
//! Implementations live outside this crate (a local ledger, a database, the
//! tax authority's API). They are expected to be idempotent reads.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{Quarter, TaxYear};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Data source unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Unknown business '{0}'")]
    UnknownBusiness(String),
}

/// Total income for a quarter.
///
/// `Ok(None)` means the source holds no figure for that quarter.
#[async_trait]
pub trait IncomeProvider: Send + Sync {
    async fn total_for_quarter(
        &self,
        business_id: &str,
        tax_year: TaxYear,
        quarter: Quarter,
    ) -> Result<Option<Decimal>, ProviderError>;
}

/// Total allowable (deductible) expenses for a quarter.
///
/// `Ok(None)` means the source holds no figure for that quarter.
#[async_trait]
pub trait ExpenseProvider: Send + Sync {
    async fn deductible_total_for_quarter(
        &self,
        business_id: &str,
        tax_year: TaxYear,
        quarter: Quarter,
    ) -> Result<Option<Decimal>, ProviderError>;
}
