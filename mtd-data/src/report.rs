//! Plain-text rendering of the quarter overview.

use mtd_core::{QuarterViewModel, TaxYear};

/// One table row for a quarter card.
pub fn quarter_line(vm: &QuarterViewModel) -> String {
    let range = format!(
        "{} - {}",
        vm.period.start_text_compact(),
        vm.period.end_text_compact()
    );
    let marker = if vm.is_current { "*" } else { "" };

    format!(
        "{:<3} {:<21} {:<22} {:<8} {:<1} {:>14} {:>14} {:>14}",
        vm.period.quarter,
        range,
        vm.period.deadline_text,
        vm.status.display_text(),
        marker,
        vm.formatted_income,
        vm.formatted_expenses,
        vm.formatted_net,
    )
}

/// Header, one row per quarter, and the annual filing deadline.
pub fn render_overview(
    tax_year: TaxYear,
    models: &[QuarterViewModel],
) -> String {
    let mut lines = vec![
        format!("Tax year {tax_year}"),
        format!(
            "{:<3} {:<21} {:<22} {:<8} {:<1} {:>14} {:>14} {:>14}",
            "", "Period", "", "Status", "", "Income", "Expenses", "Net"
        ),
    ];
    lines.extend(models.iter().map(quarter_line));
    lines.push(format!(
        "Online filing deadline: {}",
        tax_year.online_filing_deadline_text()
    ));
    lines.join("\n")
}

/// The screen-reader sentence of every quarter, one per line.
pub fn render_accessible(models: &[QuarterViewModel]) -> String {
    models
        .iter()
        .map(|vm| vm.accessible_text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
