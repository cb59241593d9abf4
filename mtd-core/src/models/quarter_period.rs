//! A quarter bound to a specific tax year.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::format::{format_compact_date, format_day_month, format_long_date, format_short_date};
use crate::models::quarter::{DEADLINE_DAY, Quarter};
use crate::models::quarter_status::QuarterStatus;
use crate::models::tax_year::{TaxYear, saturating_ymd};

/// Concrete dates for one quarter of one tax year.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use mtd_core::{Quarter, QuarterPeriod, TaxYear};
///
/// let q3 = QuarterPeriod::materialize(Quarter::Q3, TaxYear::of(2025));
///
/// assert_eq!(q3.start_date, NaiveDate::from_ymd_opt(2025, 10, 6).unwrap());
/// assert_eq!(q3.end_date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
/// assert_eq!(q3.deadline_date, NaiveDate::from_ymd_opt(2026, 2, 7).unwrap());
/// assert_eq!(q3.label, "Q3 2025/26");
/// assert_eq!(q3.date_range_text, "6 Oct - 5 Jan");
/// assert_eq!(q3.deadline_text, "Deadline: 7 Feb 2026");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterPeriod {
    pub quarter: Quarter,
    pub tax_year: TaxYear,
    /// First day of the quarter.
    pub start_date: NaiveDate,
    /// Last day of the quarter (inclusive).
    pub end_date: NaiveDate,
    /// Last day on which the quarterly update can be submitted on time.
    pub deadline_date: NaiveDate,
    /// e.g. `"Q3 2025/26"`.
    pub label: String,
    /// e.g. `"6 Oct - 5 Jan"` (no year).
    pub date_range_text: String,
    /// e.g. `"Deadline: 7 Feb 2026"`.
    pub deadline_text: String,
}

fn offset_from(
    start: NaiveDate,
    days: u64,
) -> NaiveDate {
    start.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

/// The 7th of the month after `end_date`.
fn deadline_after(end_date: NaiveDate) -> NaiveDate {
    match end_date.checked_add_months(Months::new(1)) {
        Some(next_month) => saturating_ymd(next_month.year(), next_month.month(), DEADLINE_DAY),
        None => NaiveDate::MAX,
    }
}

impl QuarterPeriod {
    /// Computes start, end and deadline dates for `quarter` within `tax_year`.
    pub fn materialize(
        quarter: Quarter,
        tax_year: TaxYear,
    ) -> Self {
        let year_start = tax_year.start_date();
        let start_date = offset_from(year_start, quarter.start_offset_days());

        let end_date = match quarter.next() {
            Some(next) => offset_from(year_start, next.start_offset_days())
                .pred_opt()
                .unwrap_or(NaiveDate::MIN),
            None => tax_year.end_date(),
        };

        let deadline_date = deadline_after(end_date);

        Self {
            quarter,
            tax_year,
            start_date,
            end_date,
            deadline_date,
            label: format!("{} {}", quarter, tax_year.label()),
            date_range_text: format!(
                "{} - {}",
                format_day_month(start_date),
                format_day_month(end_date)
            ),
            deadline_text: format!("Deadline: {}", format_short_date(deadline_date)),
        }
    }

    /// Returns `true` if `date` lies within the quarter, inclusive.
    pub fn contains(
        &self,
        date: NaiveDate,
    ) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns `true` once `date` has reached the quarter's first day.
    pub fn has_started(
        &self,
        date: NaiveDate,
    ) -> bool {
        date >= self.start_date
    }

    /// The submission status of this quarter as seen on `now`.
    pub fn status_at(
        &self,
        now: NaiveDate,
    ) -> QuarterStatus {
        QuarterStatus::derive(self, now)
    }

    /// Whether `now` falls inside the quarter's data window.
    ///
    /// Bounded by the end date, not the deadline: once the next quarter
    /// opens this one stops being current even if its update is still due.
    pub fn is_current_at(
        &self,
        now: NaiveDate,
    ) -> bool {
        self.contains(now)
    }

    /// Signed days from `now` to the deadline; negative once overdue.
    pub fn days_until_deadline(
        &self,
        now: NaiveDate,
    ) -> i64 {
        (self.deadline_date - now).num_days()
    }

    /// Start date for tabular display, e.g. `"6 Oct '25"`.
    pub fn start_text_compact(&self) -> String {
        format_compact_date(self.start_date)
    }

    /// End date for tabular display, e.g. `"5 Jan '26"`.
    pub fn end_text_compact(&self) -> String {
        format_compact_date(self.end_date)
    }

    /// Deadline with the full month name, e.g. `"7 February 2026"`.
    pub fn deadline_text_long(&self) -> String {
        format_long_date(self.deadline_date)
    }
}
