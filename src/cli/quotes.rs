use super::ui;
use crate::core::config::TrackedCurrency;
use crate::core::quote::QuoteBoard;
use crate::core::source::{CurrencySource, load_quotes};
use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::Cell;

/// Days shown in the evolution table.
const EVOLUTION_DAYS: usize = 30;

pub async fn run(
    source: &dyn CurrencySource,
    currencies: &[TrackedCurrency],
    today: NaiveDate,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching quotes...");
    let board = load_quotes(source, currencies).await;
    pb.finish_and_clear();

    if board.is_empty() {
        println!("{}", ui::no_data("currency quotes"));
        return Ok(());
    }

    println!("{}", display_latest(&board, today));
    ui::print_separator();
    println!("{}", display_evolution(&board, EVOLUTION_DAYS));
    Ok(())
}

/// Latest quote per currency next to the previous close.
pub fn display_latest(board: &QuoteBoard, today: NaiveDate) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Date"),
        ui::header_cell("Buy"),
        ui::header_cell("Sell"),
        ui::header_cell("Previous close"),
        ui::header_cell("Change"),
    ]);

    for (label, latest) in board.latest_all() {
        let previous = board.previous(label);
        let change = previous
            .filter(|p| p.sell > 0.0)
            .map(|p| (latest.sell / p.sell - 1.0) * 100.0);

        table.add_row(vec![
            Cell::new(label),
            Cell::new(latest.date.format("%d/%m/%Y")),
            ui::format_optional_cell(Some(latest.buy), ui::fmt_money),
            ui::format_optional_cell(Some(latest.sell), ui::fmt_money),
            ui::format_optional_cell(previous.map(|p| p.sell), ui::fmt_money),
            change.map_or_else(|| ui::format_optional_cell(None::<f64>, ui::fmt_percent), ui::change_cell),
        ]);
    }

    format!(
        "{}\n\n{table}",
        ui::style_text(
            &format!("Quotes of the day ({})", today.format("%d/%m/%Y")),
            ui::StyleType::Title
        )
    )
}

/// Selling price per day for the last `days` dates any currency quoted.
pub fn display_evolution(board: &QuoteBoard, days: usize) -> String {
    let labels: Vec<&str> = board.labels().collect();

    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("Date")];
    header.extend(labels.iter().map(|label| ui::header_cell(label)));
    table.set_header(header);

    for date in board.recent_dates(days) {
        let mut row = vec![Cell::new(date.format("%d/%m/%Y"))];
        row.extend(labels.iter().map(|label| {
            ui::format_optional_cell(board.on(label, date).map(|q| q.sell), ui::fmt_money)
        }));
        table.add_row(row);
    }

    format!(
        "{}\n\n{table}",
        ui::style_text(
            &format!("Selling price, last {days} days"),
            ui::StyleType::Title
        )
    )
}
