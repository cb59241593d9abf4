//! Source of "today" for period and status calculations.
//!
//! Everything that depends on the current date takes a [`Clock`] instead of
//! reading system time, so tests can pin the date.

use chrono::{Local, NaiveDate};

/// A single-method capability returning the reference date.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDate;
}

/// Reads the local system date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDate {
        self.0
    }
}

/// Any `Fn() -> NaiveDate` closure can act as a clock.
impl<F> Clock for F
where
    F: Fn() -> NaiveDate + Send + Sync,
{
    fn now(&self) -> NaiveDate {
        self()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fixed_clock_returns_its_date() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();

        assert_eq!(FixedClock::new(date).now(), date);
    }

    #[test]
    fn closure_clock_is_called_on_every_read() {
        let day = AtomicU32::new(1);
        let clock = || {
            let d = day.fetch_add(1, Ordering::SeqCst);
            NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
        };

        assert_eq!(clock.now(), NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
        assert_eq!(clock.now(), NaiveDate::from_ymd_opt(2025, 5, 2).unwrap());
    }
}
