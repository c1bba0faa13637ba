use super::ui;
use crate::core::aggregate::{InflationSummary, Selector, TRAILING_MONTHS, monthly_comparison};
use crate::core::period::PeriodLabel;
use crate::core::series::IndexedSeries;
use crate::core::source::{InflationSource, load_inflation};
use anyhow::Result;
use comfy_table::{Attribute, Cell};

pub async fn run(
    source: &dyn InflationSource,
    current_year: i32,
    comparison_years: &[i32],
) -> Result<()> {
    let pb = ui::new_spinner("Fetching inflation...");
    let series = load_inflation(source).await;
    pb.finish_and_clear();

    if series.is_empty() {
        println!("{}", ui::no_data("inflation data"));
        return Ok(());
    }

    let summary = InflationSummary::compute(&series, current_year, comparison_years);
    println!("{}", display_summary(&summary));
    ui::print_separator();
    println!("{}", display_trailing(&series));
    ui::print_separator();

    let mut years: Vec<i32> = comparison_years.to_vec();
    years.push(current_year);
    years.sort_unstable();
    years.dedup();
    println!("{}", display_comparison(&series, &years));
    Ok(())
}

pub fn display_summary(summary: &InflationSummary) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Period"), ui::header_cell("Inflation")]);

    table.add_row(vec![
        Cell::new(format!("Last {TRAILING_MONTHS} months")),
        ui::format_percentage_cell(summary.trailing_12m),
    ]);
    table.add_row(vec![
        Cell::new(format!("Accumulated {}", summary.current_year)).add_attribute(Attribute::Bold),
        ui::format_percentage_cell(summary.year_to_date),
    ]);
    for (year, total) in summary.full_years.iter().rev() {
        table.add_row(vec![
            Cell::new(format!("Full year {year}")),
            ui::format_percentage_cell(*total),
        ]);
    }

    let latest = summary
        .latest
        .map_or("-".to_string(), |label| label.to_string());
    format!(
        "{}\n\n{table}\n\nLatest data: {}",
        ui::style_text("INDEC inflation", ui::StyleType::Title),
        ui::style_text(&latest, ui::StyleType::TotalLabel)
    )
}

/// Monthly change and cumulative index over the trailing window.
pub fn display_trailing(series: &IndexedSeries) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Change"),
        ui::header_cell("Index"),
    ]);

    for observation in Selector::TrailingN(TRAILING_MONTHS).select(series) {
        table.add_row(vec![
            Cell::new(observation.label().short()),
            ui::change_cell(observation.value()),
            ui::format_optional_cell(Some(observation.index), |i| format!("{i:.4}")),
        ]);
    }

    format!(
        "{}\n\n{table}",
        ui::style_text(
            &format!("Last {TRAILING_MONTHS} months"),
            ui::StyleType::Title
        )
    )
}

/// Same month side by side across `years`.
pub fn display_comparison(series: &IndexedSeries, years: &[i32]) -> String {
    let comparison = monthly_comparison(series, years);

    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("Month")];
    header.extend(comparison.keys().map(|year| ui::header_cell(&year.to_string())));
    table.set_header(header);

    for month in 1..=12u32 {
        if !comparison.values().any(|months| months.contains_key(&month)) {
            continue;
        }
        let mut row = vec![Cell::new(PeriodLabel::month_name(month))];
        row.extend(comparison.values().map(|months| {
            ui::format_optional_cell(months.get(&month).copied(), ui::fmt_percent)
        }));
        table.add_row(row);
    }

    format!(
        "{}\n\n{table}",
        ui::style_text("Month by month comparison", ui::StyleType::Title)
    )
}
