use crate::core::cache::{Cache, Clock, SystemClock};
use crate::core::config::CacheConfig;
use crate::core::error::DataUnavailable;
use crate::core::quote::{CurrencyQuote, RateQuote};
use crate::core::series::RawObservation;
use crate::core::source::{CurrencySource, InflationSource, RateSource};
use crate::store::MemoryCache;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const INFLATION_KEY: &str = "inflation";
const RATES_KEY: &str = "rates";

/// Cache-aside wrapper around a data source.
///
/// Successful payloads are memoized per source key until their TTL runs
/// out; failures are never cached, so the next call tries again.
pub struct CachingSource<S> {
    inner: S,
    ttls: CacheConfig,
    inflation: MemoryCache<String, Vec<RawObservation>>,
    quotes: MemoryCache<String, Vec<CurrencyQuote>>,
    rates: MemoryCache<String, Vec<RateQuote>>,
}

impl<S> CachingSource<S> {
    pub fn new(inner: S, ttls: CacheConfig) -> Self {
        Self::with_clock(inner, ttls, Arc::new(SystemClock))
    }

    pub fn with_clock(inner: S, ttls: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            ttls,
            inflation: MemoryCache::with_clock(Arc::clone(&clock)),
            quotes: MemoryCache::with_clock(Arc::clone(&clock)),
            rates: MemoryCache::with_clock(clock),
        }
    }
}

#[async_trait]
impl<S: InflationSource> InflationSource for CachingSource<S> {
    async fn fetch_inflation(&self) -> Result<Vec<RawObservation>, DataUnavailable> {
        let key = INFLATION_KEY.to_string();
        if let Some(cached) = self.inflation.get(&key).await {
            debug!("Cache hit for inflation");
            return Ok(cached);
        }
        let result = self.inner.fetch_inflation().await?;
        self.inflation
            .put(key, result.clone(), self.ttls.inflation_ttl())
            .await;
        Ok(result)
    }
}

#[async_trait]
impl<S: CurrencySource> CurrencySource for CachingSource<S> {
    async fn fetch_quotes(&self, path: &str) -> Result<Vec<CurrencyQuote>, DataUnavailable> {
        let key = format!("quotes/{path}");
        if let Some(cached) = self.quotes.get(&key).await {
            debug!("Cache hit for quotes: {}", path);
            return Ok(cached);
        }
        let result = self.inner.fetch_quotes(path).await?;
        self.quotes
            .put(key, result.clone(), self.ttls.quotes_ttl())
            .await;
        Ok(result)
    }
}

#[async_trait]
impl<S: RateSource> RateSource for CachingSource<S> {
    async fn fetch_rates(&self) -> Result<Vec<RateQuote>, DataUnavailable> {
        let key = RATES_KEY.to_string();
        if let Some(cached) = self.rates.get(&key).await {
            debug!("Cache hit for rates");
            return Ok(cached);
        }
        let result = self.inner.fetch_rates().await?;
        self.rates
            .put(key, result.clone(), self.ttls.rates_ttl())
            .await;
        Ok(result)
    }
}
