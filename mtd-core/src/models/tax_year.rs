//! UK tax year value type.
//!
//! A UK tax year runs from 6 April to the following 5 April and is
//! identified by the calendar year in which it starts. `TaxYear::of(2025)`
//! is the 2025/26 tax year.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use mtd_core::TaxYear;
//!
//! let year = TaxYear::of(2025);
//!
//! assert_eq!(year.label(), "2025/26");
//! assert_eq!(year.start_date(), NaiveDate::from_ymd_opt(2025, 4, 6).unwrap());
//! assert_eq!(year.end_date(), NaiveDate::from_ymd_opt(2026, 4, 5).unwrap());
//! assert_eq!(
//!     year.online_filing_deadline(),
//!     NaiveDate::from_ymd_opt(2027, 1, 31).unwrap()
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::format::format_long_date;
use crate::models::quarter::Quarter;
use crate::models::quarter_period::QuarterPeriod;
use crate::models::TaxPeriodError;

const START_MONTH: u32 = 4;
const START_DAY: u32 = 6;
const END_DAY: u32 = 5;
const FILING_DEADLINE_MONTH: u32 = 1;
const FILING_DEADLINE_DAY: u32 = 31;

/// Builds a date whose month and day are known to be valid.
///
/// Years beyond the range chrono can represent saturate to
/// [`NaiveDate::MIN`] / [`NaiveDate::MAX`].
pub(crate) fn saturating_ymd(
    year: i32,
    month: u32,
    day: u32,
) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(if year < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

/// One UK fiscal year, identified by its starting calendar year.
///
/// Equality and ordering follow the start year. Any `i32` is accepted;
/// there is no validation of far-past or far-future years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxYear {
    start_year: i32,
}

impl TaxYear {
    /// Creates the tax year starting on 6 April of `start_year`.
    pub const fn of(start_year: i32) -> Self {
        Self { start_year }
    }

    /// The tax year containing today's date on the system clock.
    pub fn current() -> Self {
        Self::current_at(&SystemClock)
    }

    /// The tax year containing today's date according to `clock`.
    pub fn current_at(clock: &dyn Clock) -> Self {
        Self::from_date(clock.now())
    }

    /// The tax year containing `date`.
    ///
    /// Dates from 6 April onwards belong to the tax year starting that
    /// calendar year; earlier dates belong to the previous one.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use mtd_core::TaxYear;
    ///
    /// let april_5 = NaiveDate::from_ymd_opt(2026, 4, 5).unwrap();
    /// let april_6 = NaiveDate::from_ymd_opt(2026, 4, 6).unwrap();
    ///
    /// assert_eq!(TaxYear::from_date(april_5), TaxYear::of(2025));
    /// assert_eq!(TaxYear::from_date(april_6), TaxYear::of(2026));
    /// ```
    pub fn from_date(date: NaiveDate) -> Self {
        let year = date.year();
        if (date.month(), date.day()) >= (START_MONTH, START_DAY) {
            Self::of(year)
        } else {
            Self::of(year - 1)
        }
    }

    /// The calendar year in which this tax year starts.
    pub const fn start_year(&self) -> i32 {
        self.start_year
    }

    /// 6 April of the start year.
    pub fn start_date(&self) -> NaiveDate {
        saturating_ymd(self.start_year, START_MONTH, START_DAY)
    }

    /// 5 April of the following year (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        saturating_ymd(self.start_year.saturating_add(1), START_MONTH, END_DAY)
    }

    /// Label such as `"2025/26"`.
    pub fn label(&self) -> String {
        let end_suffix = (i64::from(self.start_year) + 1).rem_euclid(100);
        format!("{}/{:02}", self.start_year, end_suffix)
    }

    /// 31 January, two calendar years after the start year.
    pub fn online_filing_deadline(&self) -> NaiveDate {
        saturating_ymd(
            self.start_year.saturating_add(2),
            FILING_DEADLINE_MONTH,
            FILING_DEADLINE_DAY,
        )
    }

    /// The annual filing deadline as `"31 January 2027"`.
    pub fn online_filing_deadline_text(&self) -> String {
        format_long_date(self.online_filing_deadline())
    }

    /// Returns `true` if `date` falls between the start and end dates, inclusive.
    pub fn contains(
        &self,
        date: NaiveDate,
    ) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    pub const fn next(&self) -> Self {
        Self::of(self.start_year.saturating_add(1))
    }

    pub const fn previous(&self) -> Self {
        Self::of(self.start_year.saturating_sub(1))
    }

    /// All four quarters of this tax year, Q1 first.
    pub fn quarters(&self) -> [QuarterPeriod; 4] {
        Quarter::values().map(|quarter| QuarterPeriod::materialize(quarter, *self))
    }
}

impl From<i32> for TaxYear {
    fn from(start_year: i32) -> Self {
        Self::of(start_year)
    }
}

impl fmt::Display for TaxYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.pad(&self.label())
    }
}

/// Parses either a bare start year (`"2025"`) or a label (`"2025/26"`).
///
/// The two-digit suffix of a label must name the year after the start year.
impl FromStr for TaxYear {
    type Err = TaxPeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || TaxPeriodError::InvalidTaxYear(s.to_string());

        let (start, suffix) = match trimmed.split_once('/') {
            Some((start, suffix)) => (start, Some(suffix)),
            None => (trimmed, None),
        };

        let start_year: i32 = start.parse().map_err(|_| invalid())?;
        let year = Self::of(start_year);

        if let Some(suffix) = suffix {
            if suffix.len() != 2 || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            if !year.label().ends_with(&format!("/{suffix}")) {
                return Err(invalid());
            }
        }

        Ok(year)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::clock::FixedClock;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // =========================================================================
    // derived dates and label
    // =========================================================================

    #[test]
    fn derived_dates_follow_uk_calendar() {
        for y in [1999, 2000, 2023, 2024, 2025, 2099] {
            let year = TaxYear::of(y);

            assert_eq!(year.start_date(), date(y, 4, 6));
            assert_eq!(year.end_date(), date(y + 1, 4, 5));
            assert_eq!(year.online_filing_deadline(), date(y + 2, 1, 31));
        }
    }

    #[test]
    fn label_pads_end_year_suffix() {
        assert_eq!(TaxYear::of(2025).label(), "2025/26");
        assert_eq!(TaxYear::of(2008).label(), "2008/09");
        assert_eq!(TaxYear::of(1999).label(), "1999/00");
        assert_eq!(TaxYear::of(2099).label(), "2099/00");
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(TaxYear::of(2024).to_string(), "2024/25");
    }

    #[test]
    fn filing_deadline_text_uses_long_month() {
        assert_eq!(TaxYear::of(2025).online_filing_deadline_text(), "31 January 2027");
    }

    // =========================================================================
    // construction from dates
    // =========================================================================

    #[test]
    fn from_date_switches_on_april_sixth() {
        assert_eq!(TaxYear::from_date(date(2026, 4, 5)), TaxYear::of(2025));
        assert_eq!(TaxYear::from_date(date(2026, 4, 6)), TaxYear::of(2026));
        assert_eq!(TaxYear::from_date(date(2026, 1, 1)), TaxYear::of(2025));
        assert_eq!(TaxYear::from_date(date(2025, 12, 31)), TaxYear::of(2025));
    }

    #[test]
    fn current_at_uses_clock() {
        let clock = FixedClock::new(date(2026, 2, 15));

        assert_eq!(TaxYear::current_at(&clock), TaxYear::of(2025));
    }

    #[test]
    fn contains_is_inclusive_at_both_ends() {
        let year = TaxYear::of(2025);

        assert!(year.contains(date(2025, 4, 6)));
        assert!(year.contains(date(2026, 4, 5)));
        assert!(!year.contains(date(2025, 4, 5)));
        assert!(!year.contains(date(2026, 4, 6)));
    }

    // =========================================================================
    // ordering and navigation
    // =========================================================================

    #[test]
    fn ordering_follows_start_year() {
        assert!(TaxYear::of(2024) < TaxYear::of(2025));
        assert_eq!(TaxYear::of(2025).next(), TaxYear::of(2026));
        assert_eq!(TaxYear::of(2025).previous(), TaxYear::of(2024));
    }

    #[test]
    fn extreme_years_do_not_panic() {
        let far = TaxYear::of(i32::MAX);
        assert_eq!(far.start_date(), NaiveDate::MAX);

        let past = TaxYear::of(i32::MIN);
        assert_eq!(past.start_date(), NaiveDate::MIN);
        assert_eq!(far.quarters().len(), 4);
    }

    // =========================================================================
    // parsing
    // =========================================================================

    #[test]
    fn parses_bare_year_and_label() {
        assert_eq!("2025".parse::<TaxYear>().unwrap(), TaxYear::of(2025));
        assert_eq!(" 2025/26 ".parse::<TaxYear>().unwrap(), TaxYear::of(2025));
        assert_eq!("1999/00".parse::<TaxYear>().unwrap(), TaxYear::of(1999));
    }

    #[test]
    fn rejects_mismatched_label_suffix() {
        assert_eq!(
            "2025/27".parse::<TaxYear>(),
            Err(TaxPeriodError::InvalidTaxYear("2025/27".to_string()))
        );
        assert!("2025/6".parse::<TaxYear>().is_err());
        assert!("twenty".parse::<TaxYear>().is_err());
    }

    #[test]
    fn deserializes_from_bare_start_year() {
        use serde::de::IntoDeserializer;
        use serde::de::value::{Error, I32Deserializer};

        let de: I32Deserializer<Error> = 2025.into_deserializer();

        assert_eq!(TaxYear::deserialize(de).unwrap(), TaxYear::of(2025));
    }
}
