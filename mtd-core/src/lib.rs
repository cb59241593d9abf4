//! Tax-period model and quarterly update status engine for UK
//! self-employed businesses.

pub mod clock;
pub mod engine;
pub mod format;
pub mod models;
pub mod providers;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{QuarterViewModel, QuarterlyStatusEngine};
pub use models::*;
pub use providers::{ExpenseProvider, IncomeProvider, ProviderError};
