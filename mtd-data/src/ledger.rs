//! CSV-backed income and expense ledger.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Whitespace
//! around values is trimmed.
//!
//! | Column        | Required | Type    | Notes                                    |
//! |---------------|----------|---------|------------------------------------------|
//! | `business_id` | yes      | string  | e.g. `biz-001`                           |
//! | `date`        | yes      | date    | ISO 8601, e.g. `2025-04-20`              |
//! | `kind`        | yes      | string  | `income` or `expense` (any case)         |
//! | `amount`      | yes      | decimal | non-negative, e.g. `1250.00`             |
//! | `deductible`  | no       | bool    | expenses only; empty means `true`        |
//! | `description` | no       | string  |                                          |
//!
//! ### Example
//!
//! ```csv
//! business_id,date,kind,amount,deductible,description
//! biz-001,2025-04-20,income,1250.00,,Invoice 17
//! biz-001,2025-05-02,expense,89.99,true,Train fares
//! biz-001,2025-05-10,expense,40.00,false,Client lunch
//! ```
//!
//! [`Ledger`] answers the status engine's provider queries by summing the
//! entries of one business whose date falls inside the requested quarter.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use mtd_core::{ExpenseProvider, IncomeProvider, ProviderError, Quarter, QuarterPeriod, TaxYear};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    business_id: String,
    date: NaiveDate,
    kind: String,
    amount: String,
    deductible: Option<bool>,
    description: Option<String>,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading a ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, unparseable date or flag).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read ledger '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `kind` was neither `income` nor `expense`. `row` is 1-based
    /// (header = row 0).
    #[error("unrecognised entry kind '{kind}' on row {row}")]
    InvalidKind { kind: String, row: usize },

    /// `amount` is not a plain decimal number such as `1250.00`.
    #[error("invalid amount '{amount}' on row {row}")]
    InvalidAmount { amount: String, row: usize },

    #[error("negative amount {amount} on row {row}; record refunds as separate entries")]
    NegativeAmount { amount: Decimal, row: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub business_id: String,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub amount: Decimal,
    /// Whether an expense is allowable against profit. Always `true` for income.
    pub deductible: bool,
    pub description: String,
}

/// In-memory ledger for one or more businesses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<LedgerEntry, LedgerError> {
    let kind = EntryKind::parse(&row.kind).ok_or_else(|| LedgerError::InvalidKind {
        kind: row.kind.clone(),
        row: row_number,
    })?;

    let amount = Decimal::from_str(&row.amount).map_err(|_| LedgerError::InvalidAmount {
        amount: row.amount.clone(),
        row: row_number,
    })?;

    if amount < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount {
            amount,
            row: row_number,
        });
    }

    Ok(LedgerEntry {
        business_id: row.business_id,
        date: row.date,
        kind,
        amount,
        deductible: kind == EntryKind::Income || row.deductible.unwrap_or(true),
        description: row.description.unwrap_or_default(),
    })
}

impl Ledger {
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    /// Parse ledger rows from any reader. Rows keep file order.
    ///
    /// # Errors
    ///
    /// * [`LedgerError::Parse`] if the CSV is malformed or a field cannot be
    ///   deserialised.
    /// * [`LedgerError::InvalidKind`] / [`LedgerError::NegativeAmount`] for
    ///   rows that parse but make no sense.
    pub fn parse<R: Read>(reader: R) -> Result<Self, LedgerError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (index, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
            entries.push(convert_row(result?, index + 1)?);
        }

        Ok(Self { entries })
    }

    pub fn load_from_str(input: &str) -> Result<Self, LedgerError> {
        Self::parse(input.as_bytes())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LedgerError> {
        let file = fs::File::open(path).map_err(|source| LedgerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ledger = Self::parse(file)?;
        debug!(path = %path.display(), entries = ledger.len(), "ledger loaded");
        Ok(ledger)
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct business ids, sorted alphabetically.
    pub fn businesses(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.iter().map(|e| e.business_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn knows_business(
        &self,
        business_id: &str,
    ) -> bool {
        self.entries.iter().any(|e| e.business_id == business_id)
    }

    /// Sums matching entries of `business_id` inside the quarter.
    ///
    /// Returns `Ok(None)` when nothing matched,
    /// [`ProviderError::UnknownBusiness`] when the ledger has no rows at all
    /// for that business and [`ProviderError::Query`] when the sum does not
    /// fit in a [`Decimal`].
    fn quarter_total(
        &self,
        business_id: &str,
        tax_year: TaxYear,
        quarter: Quarter,
        include: impl Fn(&LedgerEntry) -> bool,
    ) -> Result<Option<Decimal>, ProviderError> {
        if !self.knows_business(business_id) {
            return Err(ProviderError::UnknownBusiness(business_id.to_string()));
        }

        let period = QuarterPeriod::materialize(quarter, tax_year);
        let mut total: Option<Decimal> = None;

        for entry in self
            .entries
            .iter()
            .filter(|e| e.business_id == business_id && period.contains(e.date) && include(e))
        {
            let sum = total.unwrap_or(Decimal::ZERO).checked_add(entry.amount);
            total = Some(sum.ok_or_else(|| {
                ProviderError::Query(format!(
                    "{} total for {} overflowed",
                    period.label, business_id
                ))
            })?);
        }

        Ok(total)
    }
}

// ---------------------------------------------------------------------------
// Provider implementations
// ---------------------------------------------------------------------------

#[async_trait]
impl IncomeProvider for Ledger {
    async fn total_for_quarter(
        &self,
        business_id: &str,
        tax_year: TaxYear,
        quarter: Quarter,
    ) -> Result<Option<Decimal>, ProviderError> {
        self.quarter_total(business_id, tax_year, quarter, |e| {
            e.kind == EntryKind::Income
        })
    }
}

#[async_trait]
impl ExpenseProvider for Ledger {
    async fn deductible_total_for_quarter(
        &self,
        business_id: &str,
        tax_year: TaxYear,
        quarter: Quarter,
    ) -> Result<Option<Decimal>, ProviderError> {
        self.quarter_total(business_id, tax_year, quarter, |e| {
            e.kind == EntryKind::Expense && e.deductible
        })
    }
}
