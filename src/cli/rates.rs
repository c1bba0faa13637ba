use super::ui;
use crate::core::quote::RateSnapshot;
use crate::core::source::{RateSource, load_rates};
use anyhow::Result;
use comfy_table::Cell;

pub async fn run(source: &dyn RateSource) -> Result<()> {
    let pb = ui::new_spinner("Fetching deposit rates...");
    let snapshot = load_rates(source).await;
    pb.finish_and_clear();

    if snapshot.is_empty() {
        println!("{}", ui::no_data("deposit rates"));
        return Ok(());
    }
    println!("{}", display_snapshot(&snapshot));
    Ok(())
}

pub fn display_snapshot(snapshot: &RateSnapshot) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Bank"), ui::header_cell("TNA (%)")]);

    for quote in snapshot.iter() {
        table.add_row(vec![
            Cell::new(&quote.entity),
            ui::format_optional_cell(Some(quote.annual_rate), ui::fmt_ar),
        ]);
    }

    format!(
        "{}\n\n{table}",
        ui::style_text("Fixed-term deposit rates", ui::StyleType::Title)
    )
}
