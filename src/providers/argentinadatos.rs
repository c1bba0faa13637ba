//! Adapter for the public api.argentinadatos.com JSON endpoints.

use super::util::{fetch_json, http_client};
use crate::core::error::DataUnavailable;
use crate::core::quote::{CurrencyQuote, RateQuote};
use crate::core::series::RawObservation;
use crate::core::source::{CurrencySource, InflationSource, RateSource};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

const SOURCE_NAME: &str = "argentinadatos";

pub struct ArgentinaDatosProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ArgentinaDatosProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: http_client(timeout)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct InflationRecord {
    fecha: String,
    #[serde(default)]
    valor: Value,
}

#[derive(Debug, Deserialize)]
struct DollarRecord {
    fecha: String,
    #[serde(default)]
    compra: Value,
    #[serde(default)]
    venta: Value,
}

#[derive(Debug, Deserialize)]
struct DepositRateRecord {
    entidad: String,
    #[serde(rename = "tnaClientes", default)]
    tna_clientes: Value,
}

/// Accepts `YYYY-MM-DD` as well as full ISO 8601 timestamps.
fn parse_api_date(date_str: &str) -> Option<NaiveDate> {
    let day = date_str.get(..10).unwrap_or(date_str);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Coerces a JSON number or numeric string into `f64`.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

#[async_trait]
impl InflationSource for ArgentinaDatosProvider {
    #[instrument(name = "InflationFetch", skip(self))]
    async fn fetch_inflation(&self) -> Result<Vec<RawObservation>, DataUnavailable> {
        let url = format!("{}/v1/finanzas/indices/inflacion", self.base_url);
        let records: Vec<InflationRecord> = fetch_json(&self.client, SOURCE_NAME, &url).await?;

        let observations: Vec<RawObservation> = records
            .iter()
            .filter_map(|r| match parse_api_date(&r.fecha) {
                Some(date) => Some(RawObservation::new(date, coerce_number(&r.valor))),
                None => {
                    debug!("Skipping inflation record with bad date: {}", r.fecha);
                    None
                }
            })
            .collect();
        debug!(count = observations.len(), "Fetched inflation observations");
        Ok(observations)
    }
}

#[async_trait]
impl CurrencySource for ArgentinaDatosProvider {
    #[instrument(name = "QuotesFetch", skip(self))]
    async fn fetch_quotes(&self, path: &str) -> Result<Vec<CurrencyQuote>, DataUnavailable> {
        let url = format!("{}/v1/cotizaciones/dolares/{}", self.base_url, path);
        let records: Vec<DollarRecord> = fetch_json(&self.client, SOURCE_NAME, &url).await?;

        let quotes: Vec<CurrencyQuote> = records
            .iter()
            .filter_map(|r| {
                Some(CurrencyQuote {
                    date: parse_api_date(&r.fecha)?,
                    buy: coerce_number(&r.compra)?,
                    sell: coerce_number(&r.venta)?,
                })
            })
            .collect();
        debug!(count = quotes.len(), "Fetched currency quotes");
        Ok(quotes)
    }
}

#[async_trait]
impl RateSource for ArgentinaDatosProvider {
    #[instrument(name = "DepositRatesFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<Vec<RateQuote>, DataUnavailable> {
        let url = format!("{}/v1/finanzas/tasas/plazoFijo", self.base_url);
        let records: Vec<DepositRateRecord> = fetch_json(&self.client, SOURCE_NAME, &url).await?;

        // tnaClientes is a fraction of 1.
        let quotes: Vec<RateQuote> = records
            .into_iter()
            .filter_map(|r| {
                let fraction = coerce_number(&r.tna_clientes)?;
                Some(RateQuote {
                    entity: r.entidad.trim().to_string(),
                    annual_rate: fraction * 100.0,
                })
            })
            .collect();
        debug!(count = quotes.len(), "Fetched deposit rates");
        Ok(quotes)
    }
}
