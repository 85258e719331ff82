//! Time-bounded reuse of upstream payloads, keyed by coordinate pair.
//!
//! Entries live in memory only. A zero TTL disables storage entirely.

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

struct StoredEntry<T> {
    value: T,
    expires_at: Instant,
}

/// In-memory TTL cache
pub struct FreshnessCache<T> {
    ttl: Duration,
    store: RwLock<HashMap<String, StoredEntry<T>>>,
}

impl<T: Clone + Send + Sync> FreshnessCache<T> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            store: RwLock::new(HashMap::new()),
        }
    }

    /// A cache that never retains anything
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Cache key for a coordinate pair. `f64` display is exact, so only
    /// identical coordinates share a key.
    #[must_use]
    pub fn coordinate_key(lat: f64, lon: f64) -> String {
        format!("weather:{lat}:{lon}")
    }

    /// Stores a value for the configured TTL.
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub async fn put(&self, key: &str, value: T) {
        if !self.is_enabled() {
            return;
        }
        let entry = StoredEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        let mut store = self.store.write().await;
        store.retain(|_, e| e.expires_at > Instant::now());
        store.insert(key.to_string(), entry);
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub async fn get(&self, key: &str) -> Option<T> {
        if !self.is_enabled() {
            return None;
        }

        let expired = {
            let store = self.store.read().await;
            match store.get(key) {
                Some(entry) if Instant::now() < entry.expires_at => {
                    tracing::debug!("Key found and still fresh");
                    return Some(entry.value.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            tracing::debug!("Key found but expired");
            self.remove(key).await;
        } else {
            tracing::debug!("Key not found");
        }
        None
    }

    async fn remove(&self, key: &str) {
        self.store.write().await.remove(key);
    }

    /// Number of stored entries, expired ones included until evicted
    #[cfg(test)]
    async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    #[cfg(test)]
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<T> Debug for FreshnessCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreshnessCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
