use crate::di::{DependenciesInject, DependenciesInjectDeps};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{cache::DynCacheBackend, jwt::DynJwtService},
    cache::{CacheStore, RedisCacheBackend},
    config::{Config, ConnectionManager, JwtConfig, RedisConfig, RedisPool},
    utils::Metrics,
};
use std::{sync::Arc, time::Duration};

#[derive(Debug, Clone)]
pub struct RouteSettings {
    pub route_version: String,
    pub cookie_name: String,
    pub cache_ttl: Duration,
}

impl From<&Config> for RouteSettings {
    fn from(config: &Config) -> Self {
        Self {
            route_version: config.route_version.clone(),
            cookie_name: config.cookie_name.clone(),
            cache_ttl: config.cache_ttl,
        }
    }
}

pub struct AppState {
    pub jwt_config: DynJwtService,
    pub cache_store: Arc<CacheStore>,
    pub di_container: DependenciesInject,
    pub settings: RouteSettings,
    pub registry: Arc<Registry>,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;

        let pool = ConnectionManager::new_pool(&config.database_url, config.run_migrations)
            .await
            .context("Failed to create database pool")?;

        let redis = RedisPool::new(&RedisConfig::from(&config.redis))
            .context("Failed to connect to Redis")?;
        redis.ping().await.context("Failed to ping Redis server")?;

        let cache_backend = Arc::new(RedisCacheBackend::new(redis.pool.clone())) as DynCacheBackend;
        let cache_store = Arc::new(CacheStore::new(cache_backend));

        let metrics = Metrics::new();
        let mut registry = Registry::with_prefix("transaction");
        metrics.register(&mut registry);

        let di_container = DependenciesInject::new(DependenciesInjectDeps {
            pool,
            config: config.clone(),
            metrics,
        })
        .await
        .context("Failed to initialize dependency injection container")?;

        Ok(Self {
            jwt_config,
            cache_store,
            di_container,
            settings: RouteSettings::from(config),
            registry: Arc::new(registry),
        })
    }
}
