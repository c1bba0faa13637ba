//! Restates an amount from one period's purchasing power to another's.

use crate::core::error::EngineError;
use crate::core::period::PeriodLabel;
use crate::core::series::IndexedSeries;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub origin: PeriodLabel,
    pub destination: PeriodLabel,
    pub amount: Decimal,
    pub converted_amount: Decimal,
    pub variation_percent: f64,
}

/// Restates `amount`, expressed in `origin` money, into `destination` money
/// using the cumulative index of `series`.
///
/// Both labels must exist in the series. Converting a period into itself
/// returns the amount untouched.
pub fn convert(
    series: &IndexedSeries,
    amount: Decimal,
    origin: PeriodLabel,
    destination: PeriodLabel,
) -> Result<Conversion, EngineError> {
    let origin_index = series
        .find(origin)
        .ok_or(EngineError::PeriodNotFound(origin))?
        .index;
    let destination_index = series
        .find(destination)
        .ok_or(EngineError::PeriodNotFound(destination))?
        .index;

    if origin == destination {
        return Ok(Conversion {
            origin,
            destination,
            amount,
            converted_amount: amount,
            variation_percent: 0.0,
        });
    }

    let ratio = destination_index / origin_index;
    if !ratio.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "index ratio between {origin} and {destination} is not finite"
        )));
    }
    let factor = Decimal::from_f64(ratio).ok_or_else(|| {
        EngineError::InvalidInput(format!("index ratio {ratio} is out of range"))
    })?;
    let converted_amount = amount
        .checked_mul(factor)
        .ok_or_else(|| EngineError::InvalidInput(format!("amount {amount} is too large")))?;

    debug!(%origin, %destination, ratio, "Converted amount between periods");
    Ok(Conversion {
        origin,
        destination,
        amount,
        converted_amount,
        variation_percent: (ratio - 1.0) * 100.0,
    })
}
