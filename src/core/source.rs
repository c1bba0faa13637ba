//! Data source abstractions and the "no data" boundary.

use crate::core::config::TrackedCurrency;
use crate::core::error::DataUnavailable;
use crate::core::quote::{CurrencyQuote, QuoteBoard, RateQuote, RateSnapshot};
use crate::core::series::{IndexedSeries, RawObservation, normalize};
use async_trait::async_trait;
use futures::future::join_all;
use tracing::warn;

#[async_trait]
pub trait InflationSource: Send + Sync {
    /// Monthly inflation observations, in whatever order the source lists them.
    async fn fetch_inflation(&self) -> Result<Vec<RawObservation>, DataUnavailable>;
}

#[async_trait]
pub trait CurrencySource: Send + Sync {
    /// Quote history for one currency, identified by the source path
    /// segment (e.g. `blue`).
    async fn fetch_quotes(&self, path: &str) -> Result<Vec<CurrencyQuote>, DataUnavailable>;
}

#[async_trait]
pub trait RateSource: Send + Sync {
    /// Deposit rates in fetch order, annual rates already in percent.
    async fn fetch_rates(&self) -> Result<Vec<RateQuote>, DataUnavailable>;
}

/// Fetches and normalizes inflation, degrading to an empty series when the
/// source is unavailable.
pub async fn load_inflation(source: &dyn InflationSource) -> IndexedSeries {
    match source.fetch_inflation().await {
        Ok(raw) => normalize(raw),
        Err(e) => {
            warn!(error = %e, "Inflation data unavailable, using empty series");
            IndexedSeries::empty()
        }
    }
}

/// Fetches the current rate snapshot, empty when the source is unavailable.
pub async fn load_rates(source: &dyn RateSource) -> RateSnapshot {
    match source.fetch_rates().await {
        Ok(quotes) => RateSnapshot::from_quotes(quotes),
        Err(e) => {
            warn!(error = %e, "Rate data unavailable, using empty snapshot");
            RateSnapshot::default()
        }
    }
}

/// Fetches every tracked currency concurrently. Currencies whose fetch fails
/// are left out of the board.
pub async fn load_quotes(source: &dyn CurrencySource, currencies: &[TrackedCurrency]) -> QuoteBoard {
    let futures = currencies.iter().map(|currency| async move {
        (currency, source.fetch_quotes(&currency.path).await)
    });

    let mut board = QuoteBoard::new();
    for (currency, result) in join_all(futures).await {
        match result {
            Ok(quotes) => board.insert(currency.label.clone(), quotes),
            Err(e) => warn!(
                currency = %currency.label,
                error = %e,
                "Currency quotes unavailable, skipping"
            ),
        }
    }
    board
}
