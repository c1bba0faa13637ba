//! Adapter scraping the BCRA "plazos fijos online" HTML table.

use super::util::{fetch_text, http_client};
use crate::core::error::DataUnavailable;
use crate::core::quote::RateQuote;
use crate::core::source::RateSource;
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use tracing::{debug, instrument};

const SOURCE_NAME: &str = "bcra";

static RE_TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<table[^>]*>(.*?)</table>").expect("table regex"));
static RE_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("row regex"));
static RE_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<t[dh][^>]*>(.*?)</t[dh]>").expect("cell regex"));
static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static RE_RATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+[.,]\d+").expect("rate regex"));

pub struct BcraRatesProvider {
    url: String,
    client: reqwest::Client,
}

impl BcraRatesProvider {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            url: url.to_string(),
            client: http_client(timeout)?,
        })
    }
}

/// Plain text of a table cell: tags stripped, entities decoded, whitespace
/// collapsed.
fn cell_text(html: &str) -> String {
    let stripped = RE_TAGS.replace_all(html, " ");
    let decoded = html_escape::decode_html_entities(&stripped);
    RE_WS.replace_all(&decoded, " ").trim().to_string()
}

/// Extracts a pre-scaled percentage such as `"37,50 %"` as `37.5`.
fn parse_rate(text: &str) -> Option<f64> {
    let found = RE_RATE.find(text)?;
    found.as_str().replace(',', ".").parse().ok()
}

/// Reads entity/rate pairs from the first table with at least two columns.
/// Rows without a recognizable rate, such as headers, are skipped.
pub fn parse_rate_table(html: &str) -> Vec<RateQuote> {
    for table in RE_TABLE.captures_iter(html) {
        let rows: Vec<Vec<String>> = RE_ROW
            .captures_iter(&table[1])
            .map(|row| {
                RE_CELL
                    .captures_iter(&row[1])
                    .map(|cell| cell_text(&cell[1]))
                    .collect()
            })
            .collect();

        if !rows.iter().any(|cells| cells.len() >= 2) {
            continue;
        }

        return rows
            .into_iter()
            .filter(|cells| cells.len() >= 2)
            .filter_map(|cells| {
                let annual_rate = parse_rate(&cells[1])?;
                if cells[0].is_empty() {
                    return None;
                }
                Some(RateQuote {
                    entity: cells[0].clone(),
                    annual_rate,
                })
            })
            .collect();
    }
    Vec::new()
}

#[async_trait]
impl RateSource for BcraRatesProvider {
    #[instrument(name = "BcraRatesFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<Vec<RateQuote>, DataUnavailable> {
        let html = fetch_text(&self.client, SOURCE_NAME, &self.url).await?;
        let quotes = parse_rate_table(&html);
        if quotes.is_empty() {
            return Err(DataUnavailable::new(SOURCE_NAME, "no rate table found"));
        }
        debug!(count = quotes.len(), "Scraped deposit rates");
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r##"
<html><body>
<table class="layout"><tr><td>Plazos fijos online</td></tr></table>
<table class="table">
  <thead><tr><th>Entidad</th><th>Tasa</th></tr></thead>
  <tbody>
    <tr><td><a href="#">BANCO DE LA NACI&Oacute;N ARGENTINA</a></td><td>29,00 %</td></tr>
    <tr><td>BANCO  GALICIA</td><td><b>30,50%</b></td></tr>
    <tr><td>BANCO SIN TASA</td><td>-</td></tr>
  </tbody>
</table>
</body></html>
"##;

    #[test]
    fn test_parse_rate_table() {
        let quotes = parse_rate_table(PAGE);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].entity, "BANCO DE LA NACIÓN ARGENTINA");
        assert_eq!(quotes[0].annual_rate, 29.0);
        assert_eq!(quotes[1].entity, "BANCO GALICIA");
        assert_eq!(quotes[1].annual_rate, 30.5);
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("37,50 %"), Some(37.5));
        assert_eq!(parse_rate("TNA 31.25"), Some(31.25));
        assert_eq!(parse_rate("40 %"), None);
    }

    #[test]
    fn test_page_without_tables() {
        assert!(parse_rate_table("<html><p>Mantenimiento</p></html>").is_empty());
    }

    #[tokio::test]
    async fn test_fetch_rates() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/BCRAyVos/Plazos_fijos_online.asp"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&mock_server)
            .await;

        let url = format!("{}/BCRAyVos/Plazos_fijos_online.asp", mock_server.uri());
        let provider = BcraRatesProvider::new(&url, Duration::from_secs(5)).unwrap();
        let quotes = provider.fetch_rates().await.unwrap();

        assert_eq!(quotes.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_rates_without_table() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>down</html>"))
            .mount(&mock_server)
            .await;

        let provider = BcraRatesProvider::new(&mock_server.uri(), Duration::from_secs(5)).unwrap();
        assert!(provider.fetch_rates().await.is_err());
    }
}
