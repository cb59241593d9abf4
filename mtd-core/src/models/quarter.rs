//! The four fixed quarterly update periods of a UK tax year.
//!
//! | Quarter | Starts | Ends   | Update deadline |
//! |---------|--------|--------|-----------------|
//! | Q1      | 6 Apr  | 5 Jul  | 7 Aug           |
//! | Q2      | 6 Jul  | 5 Oct  | 7 Nov           |
//! | Q3      | 6 Oct  | 5 Jan  | 7 Feb           |
//! | Q4      | 6 Jan  | 5 Apr  | 7 May           |
//!
//! Q3 ends, and Q4 runs entirely, in the calendar year after the tax year
//! started.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TaxPeriodError;
use crate::models::quarter_period::QuarterPeriod;
use crate::models::tax_year::TaxYear;

/// One of the four quarterly periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

/// Constant lookup data for a quarter.
struct QuarterInfo {
    ordinal: u8,
    /// Days after the tax-year start date on which the quarter begins.
    start_offset_days: u64,
}

const Q1_INFO: QuarterInfo = QuarterInfo {
    ordinal: 1,
    start_offset_days: 0,
};
const Q2_INFO: QuarterInfo = QuarterInfo {
    ordinal: 2,
    start_offset_days: 91,
};
const Q3_INFO: QuarterInfo = QuarterInfo {
    ordinal: 3,
    start_offset_days: 183,
};
const Q4_INFO: QuarterInfo = QuarterInfo {
    ordinal: 4,
    start_offset_days: 275,
};

/// Day of the month on which a quarterly update falls due.
pub(crate) const DEADLINE_DAY: u32 = 7;

impl Quarter {
    const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// All quarters in tax-year order.
    pub const fn values() -> [Quarter; 4] {
        Self::ALL
    }

    fn info(&self) -> &'static QuarterInfo {
        match self {
            Self::Q1 => &Q1_INFO,
            Self::Q2 => &Q2_INFO,
            Self::Q3 => &Q3_INFO,
            Self::Q4 => &Q4_INFO,
        }
    }

    /// 1 for Q1 through 4 for Q4.
    pub fn ordinal(&self) -> u8 {
        self.info().ordinal
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.ordinal() == ordinal)
    }

    /// Days between the tax-year start and this quarter's first day.
    pub fn start_offset_days(&self) -> u64 {
        self.info().start_offset_days
    }

    /// The following quarter within the same tax year; `None` after Q4.
    pub fn next(&self) -> Option<Self> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Short name such as `"Q1"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }

    /// Binds this quarter to `tax_year`.
    pub fn materialize(
        self,
        tax_year: TaxYear,
    ) -> QuarterPeriod {
        QuarterPeriod::materialize(self, tax_year)
    }

    /// The quarter of `tax_year` that contains `date`, if any.
    pub fn containing(
        tax_year: TaxYear,
        date: NaiveDate,
    ) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|q| q.materialize(tax_year).contains(date))
    }
}

impl fmt::Display for Quarter {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Accepts `"Q1"`, `"q1"` or a bare ordinal `"1"`.
impl FromStr for Quarter {
    type Err = TaxPeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('Q')
            .or_else(|| trimmed.strip_prefix('q'))
            .unwrap_or(trimmed);

        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::from_ordinal)
            .ok_or_else(|| TaxPeriodError::InvalidQuarter(s.to_string()))
    }
}
