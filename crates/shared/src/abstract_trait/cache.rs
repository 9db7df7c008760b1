use crate::errors::CacheError;
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};

pub type DynCacheBackend = Arc<dyn CacheBackendTrait + Send + Sync>;

/// Raw string key/value storage with per-key expiry.
#[async_trait]
pub trait CacheBackendTrait {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}
