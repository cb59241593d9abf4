use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::{AccessibleQuarter, accessible_text, format_optional_currency};
use crate::models::{Quarter, QuarterPeriod, QuarterStatus};

/// Everything the UI needs to render one quarter card.
///
/// Financial figures are `None` when the quarter has not started or when
/// the data source could not supply them; the formatted strings then read
/// `"--"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterViewModel {
    pub period: QuarterPeriod,
    pub status: QuarterStatus,
    /// `true` while the reference date lies between the start and end dates.
    pub is_current: bool,
    pub total_income: Option<Decimal>,
    pub total_expenses: Option<Decimal>,
    /// Income minus expenses; `None` unless both are present and the
    /// difference fits in a [`Decimal`].
    pub net_profit_loss: Option<Decimal>,
    pub formatted_income: String,
    pub formatted_expenses: String,
    pub formatted_net: String,
    pub accessible_text: String,
}

impl QuarterViewModel {
    /// Assembles a view model, deriving the net figure and all display text.
    pub fn new(
        period: QuarterPeriod,
        status: QuarterStatus,
        is_current: bool,
        total_income: Option<Decimal>,
        total_expenses: Option<Decimal>,
    ) -> Self {
        let net_profit_loss = match (total_income, total_expenses) {
            (Some(income), Some(expenses)) => income.checked_sub(expenses),
            _ => None,
        };

        let accessible_text = accessible_text(&AccessibleQuarter {
            quarter: period.quarter.as_str(),
            tax_year_label: &period.tax_year.label(),
            date_range_text: &period.date_range_text,
            is_current,
            status_text: status.display_text(),
            deadline_text: &period.deadline_text,
            total_income,
            total_expenses,
            net_profit_loss,
        });

        Self {
            formatted_income: format_optional_currency(total_income),
            formatted_expenses: format_optional_currency(total_expenses),
            formatted_net: format_optional_currency(net_profit_loss),
            accessible_text,
            period,
            status,
            is_current,
            total_income,
            total_expenses,
            net_profit_loss,
        }
    }

    pub fn quarter(&self) -> Quarter {
        self.period.quarter
    }

    pub fn label(&self) -> &str {
        &self.period.label
    }

    pub fn has_financial_data(&self) -> bool {
        self.total_income.is_some() || self.total_expenses.is_some()
    }

    pub fn is_loss(&self) -> bool {
        self.net_profit_loss.is_some_and(|net| net < Decimal::ZERO)
    }

    /// Style class for the net figure.
    pub fn net_style_class(&self) -> &'static str {
        match self.net_profit_loss {
            None => "net-none",
            Some(net) if net < Decimal::ZERO => "net-loss",
            Some(_) => "net-profit",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxYear;

    fn q1() -> QuarterPeriod {
        Quarter::Q1.materialize(TaxYear::of(2025))
    }

    #[test]
    fn net_is_exact_decimal_difference() {
        let vm = QuarterViewModel::new(
            q1(),
            QuarterStatus::Draft,
            true,
            Some(dec!(0.30)),
            Some(dec!(0.10)),
        );

        assert_eq!(vm.net_profit_loss, Some(dec!(0.20)));
        assert_eq!(vm.formatted_net, "£0.20");
    }

    #[test]
    fn loss_keeps_negative_sign() {
        let vm = QuarterViewModel::new(
            q1(),
            QuarterStatus::Draft,
            true,
            Some(dec!(1000.00)),
            Some(dec!(1500.00)),
        );

        assert_eq!(vm.net_profit_loss, Some(dec!(-500.00)));
        assert_eq!(vm.formatted_net, "-£500.00");
        assert!(vm.is_loss());
        assert_eq!(vm.net_style_class(), "net-loss");
    }

    #[test]
    fn net_is_absent_when_either_side_is_missing() {
        let vm = QuarterViewModel::new(q1(), QuarterStatus::Draft, true, None, Some(dec!(80.00)));

        assert_eq!(vm.net_profit_loss, None);
        assert_eq!(vm.formatted_income, "--");
        assert_eq!(vm.formatted_expenses, "£80.00");
        assert_eq!(vm.formatted_net, "--");
        assert!(vm.has_financial_data());
        assert_eq!(vm.net_style_class(), "net-none");
    }

    #[test]
    fn net_overflow_is_absent() {
        let vm = QuarterViewModel::new(
            q1(),
            QuarterStatus::Draft,
            true,
            Some(Decimal::MAX),
            Some(dec!(-1)),
        );

        assert_eq!(vm.net_profit_loss, None);
        assert_eq!(vm.formatted_net, "--");
        assert_eq!(vm.net_style_class(), "net-none");
    }

    #[test]
    fn zero_is_present_not_absent() {
        let vm = QuarterViewModel::new(
            q1(),
            QuarterStatus::Draft,
            false,
            Some(Decimal::ZERO),
            Some(Decimal::ZERO),
        );

        assert_eq!(vm.formatted_net, "£0.00");
        assert!(!vm.is_loss());
        assert_eq!(vm.net_style_class(), "net-profit");
    }
}
