pub mod config;
pub mod ledger;
pub mod report;

pub use config::{AppConfig, ConfigError};
pub use ledger::{EntryKind, Ledger, LedgerEntry, LedgerError};
