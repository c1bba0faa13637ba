use crate::core::cache::{Cache, Clock, SystemClock};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

struct CacheEntry<V> {
    payload: V,
    fetched_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) >= self.ttl
    }
}

/// In-memory cache keyed by source, holding `(fetched_at, payload)` pairs.
///
/// Expired entries are evicted lazily on lookup.
pub struct MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Mutex<HashMap<K, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
}

impl<K, V> MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            clock,
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

impl<K, V> Default for MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K, V> Cache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync + Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Option<V> {
        let mut cache = self.inner.lock().await;
        let now = self.clock.now();
        match cache.get(key) {
            Some(entry) if entry.is_expired(now) => {
                debug!("Cache entry expired for key: {:?}", key);
                cache.remove(key);
                None
            }
            Some(entry) => {
                debug!("Cache HIT for key: {:?}", key);
                Some(entry.payload.clone())
            }
            None => {
                debug!("Cache MISS for key: {:?}", key);
                None
            }
        }
    }

    async fn put(&self, key: K, value: V, ttl: Duration) {
        let entry = CacheEntry {
            payload: value,
            fetched_at: self.clock.now(),
            ttl,
        };
        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for key: {:?}", key);
        cache.insert(key, entry);
    }

    async fn remove(&self, key: &K) {
        let mut cache = self.inner.lock().await;
        cache.remove(key);
        debug!("Cache REMOVE for key: {:?}", key);
    }

    async fn clear(&self) {
        let mut cache = self.inner.lock().await;
        cache.clear();
        debug!("Cache CLEAR");
    }
}
