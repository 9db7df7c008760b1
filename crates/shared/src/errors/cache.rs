use deadpool_redis::{PoolError, redis::RedisError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),

    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}
