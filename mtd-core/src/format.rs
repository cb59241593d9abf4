//! Presentation helpers for money, dates and screen-reader text.
//!
//! All functions here are pure string builders over already computed values.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder shown wherever a financial figure is unavailable.
pub const ABSENT_TEXT: &str = "--";

const CURRENCY_SYMBOL: &str = "£";

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use mtd_core::format::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a money amount as `"£1,234.50"`.
///
/// Negative amounts put the sign before the symbol: `"-£500.00"`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use mtd_core::format::format_currency;
///
/// assert_eq!(format_currency(dec!(1234567.891)), "£1,234,567.89");
/// assert_eq!(format_currency(dec!(-500)), "-£500.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let mut abs = rounded.abs();
    abs.rescale(2);
    let text = abs.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}{CURRENCY_SYMBOL}{}.{fraction}", group_thousands(whole))
}

/// Like [`format_currency`], rendering `None` as [`ABSENT_TEXT`].
pub fn format_optional_currency(value: Option<Decimal>) -> String {
    value.map_or_else(|| ABSENT_TEXT.to_string(), format_currency)
}

/// `"6 Oct"`.
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

/// `"7 Feb 2026"`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Compact tabular form, `"6 Oct '25"`.
pub fn format_compact_date(date: NaiveDate) -> String {
    date.format("%-d %b '%y").to_string()
}

/// Long form used for deadlines, `"7 February 2026"`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Inputs for a quarter's screen-reader sentence.
#[derive(Debug, Clone, Copy)]
pub struct AccessibleQuarter<'a> {
    /// Short quarter name, e.g. `"Q1"`.
    pub quarter: &'a str,
    pub tax_year_label: &'a str,
    pub date_range_text: &'a str,
    pub is_current: bool,
    pub status_text: &'a str,
    pub deadline_text: &'a str,
    pub total_income: Option<Decimal>,
    pub total_expenses: Option<Decimal>,
    pub net_profit_loss: Option<Decimal>,
}

/// Builds one sentence describing a quarter for assistive technology.
///
/// Financial phrases are only included for figures that are present, so a
/// future quarter or one whose data failed to load reads without them.
///
/// ```
/// use mtd_core::format::{AccessibleQuarter, accessible_text};
///
/// let text = accessible_text(&AccessibleQuarter {
///     quarter: "Q2",
///     tax_year_label: "2025/26",
///     date_range_text: "6 Jul - 5 Oct",
///     is_current: false,
///     status_text: "Future",
///     deadline_text: "Deadline: 7 Nov 2025",
///     total_income: None,
///     total_expenses: None,
///     net_profit_loss: None,
/// });
///
/// assert_eq!(
///     text,
///     "Q2 of tax year 2025/26, 6 Jul - 5 Oct, status Future, Deadline: 7 Nov 2025."
/// );
/// ```
pub fn accessible_text(q: &AccessibleQuarter<'_>) -> String {
    let mut parts = vec![
        format!("{} of tax year {}", q.quarter, q.tax_year_label),
        q.date_range_text.to_string(),
    ];

    if q.is_current {
        parts.push("current quarter".to_string());
    }
    parts.push(format!("status {}", q.status_text));
    parts.push(q.deadline_text.to_string());

    if let Some(income) = q.total_income {
        parts.push(format!("income {}", format_currency(income)));
    }
    if let Some(expenses) = q.total_expenses {
        parts.push(format!("expenses {}", format_currency(expenses)));
    }
    if let Some(net) = q.net_profit_loss {
        if net.is_sign_negative() && !net.is_zero() {
            parts.push(format!("net loss {}", format_currency(net.abs())));
        } else {
            parts.push(format!("net profit {}", format_currency(net)));
        }
    }

    format!("{}.", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
    }

    // =========================================================================
    // currency tests
    // =========================================================================

    #[test]
    fn currency_always_shows_two_decimals() {
        assert_eq!(format_currency(dec!(0)), "£0.00");
        assert_eq!(format_currency(dec!(5)), "£5.00");
        assert_eq!(format_currency(dec!(5.5)), "£5.50");
        assert_eq!(format_currency(dec!(5.125)), "£5.13");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(dec!(999.99)), "£999.99");
        assert_eq!(format_currency(dec!(1000)), "£1,000.00");
        assert_eq!(format_currency(dec!(12345.6)), "£12,345.60");
        assert_eq!(format_currency(dec!(1234567.891)), "£1,234,567.89");
    }

    #[test]
    fn currency_puts_sign_before_symbol() {
        assert_eq!(format_currency(dec!(-500.00)), "-£500.00");
        assert_eq!(format_currency(dec!(-1500.5)), "-£1,500.50");
    }

    #[test]
    fn currency_drops_sign_of_negative_zero_after_rounding() {
        assert_eq!(format_currency(dec!(-0.001)), "£0.00");
    }

    #[test]
    fn optional_currency_renders_absent_marker() {
        assert_eq!(format_optional_currency(None), "--");
        assert_eq!(format_optional_currency(Some(dec!(10))), "£10.00");
    }

    // =========================================================================
    // date tests
    // =========================================================================

    #[test]
    fn date_formats() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 7).unwrap();

        assert_eq!(format_day_month(date), "7 Feb");
        assert_eq!(format_short_date(date), "7 Feb 2026");
        assert_eq!(format_compact_date(date), "7 Feb '26");
        assert_eq!(format_long_date(date), "7 February 2026");
    }

    // =========================================================================
    // accessible text tests
    // =========================================================================

    fn current_q1() -> AccessibleQuarter<'static> {
        AccessibleQuarter {
            quarter: "Q1",
            tax_year_label: "2025/26",
            date_range_text: "6 Apr - 5 Jul",
            is_current: true,
            status_text: "Draft",
            deadline_text: "Deadline: 7 Aug 2025",
            total_income: Some(dec!(1000.00)),
            total_expenses: Some(dec!(250.00)),
            net_profit_loss: Some(dec!(750.00)),
        }
    }

    #[test]
    fn accessible_text_includes_financials_when_present() {
        assert_eq!(
            accessible_text(&current_q1()),
            "Q1 of tax year 2025/26, 6 Apr - 5 Jul, current quarter, status Draft, \
             Deadline: 7 Aug 2025, income £1,000.00, expenses £250.00, net profit £750.00."
        );
    }

    #[test]
    fn accessible_text_describes_loss() {
        let q = AccessibleQuarter {
            total_income: Some(dec!(1000.00)),
            total_expenses: Some(dec!(1500.00)),
            net_profit_loss: Some(dec!(-500.00)),
            ..current_q1()
        };

        assert!(accessible_text(&q).ends_with("net loss £500.00."));
    }

    #[test]
    fn accessible_text_omits_missing_figures() {
        let q = AccessibleQuarter {
            is_current: false,
            total_income: None,
            total_expenses: None,
            net_profit_loss: None,
            ..current_q1()
        };
        let text = accessible_text(&q);

        assert!(!text.contains("current quarter"));
        assert!(!text.contains("income"));
        assert!(!text.contains("expenses"));
        assert!(!text.contains("net"));
        assert!(!text.contains('£'));
    }
}
