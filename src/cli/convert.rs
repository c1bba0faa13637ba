use super::ui;
use crate::core::convert::{Conversion, convert};
use crate::core::period::PeriodLabel;
use crate::core::series::IndexedSeries;
use crate::core::source::{InflationSource, load_inflation};
use anyhow::Result;
use rust_decimal::Decimal;

/// Months back from the latest observation used as the default origin.
const DEFAULT_LOOKBACK: usize = 11;

pub async fn run(
    source: &dyn InflationSource,
    amount: Decimal,
    from: Option<PeriodLabel>,
    to: Option<PeriodLabel>,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching inflation...");
    let series = load_inflation(source).await;
    pb.finish_and_clear();

    let Some((origin, destination)) = resolve_periods(&series, from, to) else {
        println!("{}", ui::no_data("inflation data"));
        return Ok(());
    };

    let conversion = convert(&series, amount, origin, destination)?;
    println!("{}", display_conversion(&conversion));
    Ok(())
}

/// Fills unspecified periods: the destination defaults to the latest month
/// and the origin to twelve months earlier (or the oldest available).
/// Returns `None` only when a default is needed and the series is empty.
pub fn resolve_periods(
    series: &IndexedSeries,
    from: Option<PeriodLabel>,
    to: Option<PeriodLabel>,
) -> Option<(PeriodLabel, PeriodLabel)> {
    let labels = series.labels();
    let origin = match from {
        Some(label) => label,
        None => *labels.get(DEFAULT_LOOKBACK).or(labels.last())?,
    };
    let destination = match to {
        Some(label) => label,
        None => *labels.first()?,
    };
    Some((origin, destination))
}

pub fn display_conversion(conversion: &Conversion) -> String {
    format!(
        "{}\n\nAmount ({}): AR$ {}\nUpdated amount ({}): {}\nVariation between periods: {}",
        ui::style_text("Inflation adjustment", ui::StyleType::Title),
        conversion.origin,
        ui::fmt_ar_decimal(conversion.amount),
        conversion.destination,
        ui::style_text(
            &format!("AR$ {}", ui::fmt_ar_decimal(conversion.converted_amount)),
            ui::StyleType::TotalValue
        ),
        ui::style_text(
            &ui::fmt_percent(conversion.variation_percent),
            ui::StyleType::TotalLabel
        ),
    )
}
