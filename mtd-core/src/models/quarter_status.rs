//! Submission status of a quarter relative to a reference date.
//!
//! | Condition                              | Status    |
//! |----------------------------------------|-----------|
//! | `now < start_date`                     | `Future`  |
//! | `start_date <= now <= deadline_date`   | `Draft`   |
//! | `now > deadline_date`                  | `Overdue` |
//!
//! The status is never stored; it is derived again for every query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::quarter_period::QuarterPeriod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuarterStatus {
    /// The quarter has not started.
    Future,
    /// The quarter has started and its update is not yet late.
    Draft,
    /// The update deadline has passed.
    Overdue,
}

/// Design-system metadata for rendering a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub display_text: &'static str,
    pub style_class: &'static str,
    pub card_style_class: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
}

const FUTURE_STYLE: StatusStyle = StatusStyle {
    display_text: "Future",
    style_class: "status-future",
    card_style_class: "quarter-card-future",
    background_color: "#F3F4F6",
    text_color: "#4B5563",
};

const DRAFT_STYLE: StatusStyle = StatusStyle {
    display_text: "Draft",
    style_class: "status-draft",
    card_style_class: "quarter-card-draft",
    background_color: "#FEF3C7",
    text_color: "#92400E",
};

const OVERDUE_STYLE: StatusStyle = StatusStyle {
    display_text: "Overdue",
    style_class: "status-overdue",
    card_style_class: "quarter-card-overdue",
    background_color: "#FEE2E2",
    text_color: "#991B1B",
};

impl QuarterStatus {
    /// Classifies `period` as seen on `now`.
    pub fn derive(
        period: &QuarterPeriod,
        now: NaiveDate,
    ) -> Self {
        if now < period.start_date {
            Self::Future
        } else if now <= period.deadline_date {
            Self::Draft
        } else {
            Self::Overdue
        }
    }

    pub fn style(&self) -> &'static StatusStyle {
        match self {
            Self::Future => &FUTURE_STYLE,
            Self::Draft => &DRAFT_STYLE,
            Self::Overdue => &OVERDUE_STYLE,
        }
    }

    pub fn display_text(&self) -> &'static str {
        self.style().display_text
    }

    pub fn style_class(&self) -> &'static str {
        self.style().style_class
    }

    pub fn card_style_class(&self) -> &'static str {
        self.style().card_style_class
    }

    pub fn background_color(&self) -> &'static str {
        self.style().background_color
    }

    pub fn text_color(&self) -> &'static str {
        self.style().text_color
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Quarter, TaxYear};

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn future_becomes_draft_on_start_date() {
        let q2 = Quarter::Q2.materialize(TaxYear::of(2025));

        assert_eq!(QuarterStatus::derive(&q2, date(2025, 7, 5)), QuarterStatus::Future);
        assert_eq!(QuarterStatus::derive(&q2, date(2025, 7, 6)), QuarterStatus::Draft);
    }

    #[test]
    fn draft_becomes_overdue_after_deadline() {
        let q1 = Quarter::Q1.materialize(TaxYear::of(2025));

        assert_eq!(QuarterStatus::derive(&q1, date(2025, 8, 7)), QuarterStatus::Draft);
        assert_eq!(QuarterStatus::derive(&q1, date(2025, 8, 8)), QuarterStatus::Overdue);
    }

    #[test]
    fn draft_persists_between_end_date_and_deadline() {
        let q3 = Quarter::Q3.materialize(TaxYear::of(2025));
        let after_end = date(2026, 1, 20);

        assert_eq!(q3.status_at(after_end), QuarterStatus::Draft);
        assert!(!q3.is_current_at(after_end));
    }

    #[test]
    fn current_quarter_is_never_overdue() {
        for y in 2000..=2060 {
            for period in TaxYear::of(y).quarters() {
                let mut day = period.start_date;
                while day <= period.end_date {
                    assert_ne!(period.status_at(day), QuarterStatus::Overdue, "{}", period.label);
                    day = day.succ_opt().unwrap();
                }
            }
        }
    }

    #[test]
    fn style_lookup_is_constant_per_status() {
        assert_eq!(QuarterStatus::Future.display_text(), "Future");
        assert_eq!(QuarterStatus::Draft.style_class(), "status-draft");
        assert_eq!(QuarterStatus::Overdue.card_style_class(), "quarter-card-overdue");
        assert_eq!(QuarterStatus::Overdue.background_color(), "#FEE2E2");
        assert_eq!(QuarterStatus::Draft.text_color(), "#92400E");
    }
}
