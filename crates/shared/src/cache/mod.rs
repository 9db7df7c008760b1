mod redis;

pub use self::redis::RedisCacheBackend;

use crate::abstract_trait::cache::DynCacheBackend;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{error, info, warn};

/// Typed JSON view over a cache backend. Backend failures never escape:
/// reads degrade to a miss and writes are logged and dropped.
pub struct CacheStore {
    backend: DynCacheBackend,
}

impl CacheStore {
    pub fn new(backend: DynCacheBackend) -> Self {
        Self { backend }
    }

    pub async fn get_from_cache<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let raw = match self.backend.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("🔍 Cache miss for key: {key}");
                return None;
            }
            Err(e) => {
                error!("❌ Cache read failed for key {key}: {e}");
                return None;
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                info!("✅ Cache hit for key: {key}");
                Some(value)
            }
            Err(e) => {
                warn!("⚠️ Discarding undecodable cache entry {key}: {e}");
                None
            }
        }
    }

    pub async fn set_to_cache<T>(&self, key: &str, data: &T, ttl: Duration)
    where
        T: Serialize,
    {
        let raw = match serde_json::to_string(data) {
            Ok(raw) => raw,
            Err(e) => {
                error!("❌ Failed to serialize cache entry {key}: {e}");
                return;
            }
        };

        match self.backend.set(key, raw, ttl).await {
            Ok(()) => info!("💾 Cached key {key} for {}s", ttl.as_secs()),
            Err(e) => error!("❌ Cache write failed for key {key}: {e}"),
        }
    }
}
