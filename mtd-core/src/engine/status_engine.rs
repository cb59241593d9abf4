//! Quarterly status engine.
//!
//! Produces the four quarter cards for one business and tax year. Each
//! quarter is computed independently:
//!
//! 1. Materialize the quarter's dates.
//! 2. Derive its status and whether it is current from the clock.
//! 3. Skip the data providers entirely for quarters that have not started.
//! 4. Otherwise ask for income and deductible expenses separately. An
//!    error or an empty answer makes only that one figure absent.
//!
//! Provider failures are logged and never returned to the caller, so a
//! complete four-quarter view can always be rendered.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//! use rust_decimal_macros::dec;
//! use mtd_core::{
//!     ExpenseProvider, FixedClock, IncomeProvider, ProviderError, Quarter, QuarterStatus,
//!     QuarterlyStatusEngine, TaxYear,
//! };
//!
//! struct Flat;
//!
//! #[async_trait]
//! impl IncomeProvider for Flat {
//!     async fn total_for_quarter(
//!         &self,
//!         _business_id: &str,
//!         _tax_year: TaxYear,
//!         _quarter: Quarter,
//!     ) -> Result<Option<Decimal>, ProviderError> {
//!         Ok(Some(dec!(1200.00)))
//!     }
//! }
//!
//! #[async_trait]
//! impl ExpenseProvider for Flat {
//!     async fn deductible_total_for_quarter(
//!         &self,
//!         _business_id: &str,
//!         _tax_year: TaxYear,
//!         _quarter: Quarter,
//!     ) -> Result<Option<Decimal>, ProviderError> {
//!         Ok(Some(dec!(200.00)))
//!     }
//! }
//!
//! # tokio_test_block_on(async {
//! let engine = QuarterlyStatusEngine::new(
//!     "business-1",
//!     TaxYear::of(2025),
//!     Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 4, 15).unwrap())),
//!     Arc::new(Flat),
//!     Arc::new(Flat),
//! );
//!
//! let [q1, q2, _, _] = engine.quarter_view_models().await;
//!
//! assert_eq!(q1.status, QuarterStatus::Draft);
//! assert_eq!(q1.formatted_net, "£1,000.00");
//! assert_eq!(q2.status, QuarterStatus::Future);
//! assert_eq!(q2.formatted_income, "--");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::engine::view_model::QuarterViewModel;
use crate::models::{Quarter, QuarterPeriod, QuarterStatus, TaxYear};
use crate::providers::{ExpenseProvider, IncomeProvider, ProviderError};

/// Computes quarter cards for one business.
///
/// Holds no results between calls; every query re-reads the clock and
/// re-queries the providers.
pub struct QuarterlyStatusEngine {
    business_id: String,
    tax_year: TaxYear,
    clock: Arc<dyn Clock>,
    income: Arc<dyn IncomeProvider>,
    expenses: Arc<dyn ExpenseProvider>,
}

/// Collapses a provider answer into present/absent, logging failures.
fn settle(
    metric: &'static str,
    period: &QuarterPeriod,
    result: Result<Option<Decimal>, ProviderError>,
) -> Option<Decimal> {
    match result {
        Ok(Some(total)) => Some(total),
        Ok(None) => {
            debug!(quarter = %period.label, metric, "no data returned");
            None
        }
        Err(error) => {
            warn!(
                quarter = %period.label,
                metric,
                %error,
                "provider failed; figure shown as absent"
            );
            None
        }
    }
}

impl QuarterlyStatusEngine {
    pub fn new(
        business_id: impl Into<String>,
        tax_year: TaxYear,
        clock: Arc<dyn Clock>,
        income: Arc<dyn IncomeProvider>,
        expenses: Arc<dyn ExpenseProvider>,
    ) -> Self {
        Self {
            business_id: business_id.into(),
            tax_year,
            clock,
            income,
            expenses,
        }
    }

    pub fn business_id(&self) -> &str {
        &self.business_id
    }

    pub fn tax_year(&self) -> TaxYear {
        self.tax_year
    }

    /// Selects the tax year used by subsequent queries.
    pub fn set_tax_year(
        &mut self,
        tax_year: TaxYear,
    ) {
        self.tax_year = tax_year;
    }

    /// Replaces the reference clock used by subsequent queries.
    pub fn set_clock(
        &mut self,
        clock: Arc<dyn Clock>,
    ) {
        self.clock = clock;
    }

    /// The four quarter cards for the selected tax year, Q1 first.
    pub async fn quarter_view_models(&self) -> [QuarterViewModel; 4] {
        let now = self.clock.now();
        let [q1, q2, q3, q4] = Quarter::values();

        [
            self.build(q1, now).await,
            self.build(q2, now).await,
            self.build(q3, now).await,
            self.build(q4, now).await,
        ]
    }

    /// A single quarter card for the selected tax year.
    pub async fn quarter_view_model(
        &self,
        quarter: Quarter,
    ) -> QuarterViewModel {
        self.build(quarter, self.clock.now()).await
    }

    /// The card whose data window contains today, if today falls inside
    /// the selected tax year.
    pub async fn current_quarter(&self) -> Option<QuarterViewModel> {
        let now = self.clock.now();
        match Quarter::containing(self.tax_year, now) {
            Some(quarter) => Some(self.build(quarter, now).await),
            None => None,
        }
    }

    async fn build(
        &self,
        quarter: Quarter,
        now: NaiveDate,
    ) -> QuarterViewModel {
        let period = QuarterPeriod::materialize(quarter, self.tax_year);
        let status = QuarterStatus::derive(&period, now);
        let is_current = period.is_current_at(now);

        if !period.has_started(now) {
            debug!(quarter = %period.label, "quarter not started; skipping providers");
            return QuarterViewModel::new(period, status, is_current, None, None);
        }

        let income = settle(
            "income",
            &period,
            self.income
                .total_for_quarter(&self.business_id, self.tax_year, quarter)
                .await,
        );
        let expenses = settle(
            "expenses",
            &period,
            self.expenses
                .deductible_total_for_quarter(&self.business_id, self.tax_year, quarter)
                .await,
        );

        QuarterViewModel::new(period, status, is_current, income, expenses)
    }
}
