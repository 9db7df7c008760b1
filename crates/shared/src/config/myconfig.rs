use anyhow::{Context, Result, anyhow};
use std::{str::FromStr, time::Duration};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub is_dev: bool,
    pub route_version: String,
    pub cookie_name: String,
    pub redis: RedisSettings,
    pub cache_ttl: Duration,
    pub services: ServiceUrls,
    pub http_timeout: Duration,
    pub html_template_file: String,
    pub pdf_template_id: Option<String>,
    pub notifier: NotifierSettings,
}

#[derive(Debug, Clone)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    pub db: u8,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ServiceUrls {
    pub user: String,
    pub account: String,
    pub pdf: String,
}

#[derive(Debug, Clone, Copy)]
pub struct NotifierSettings {
    pub queue_capacity: usize,
    pub max_in_flight: usize,
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            max_in_flight: 32,
        }
    }
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let database_url = env.required("DATABASE_URL")?;
        let jwt_secret = env.required("JWT_SECRET")?;
        let run_migrations = match env.required("RUN_MIGRATIONS")?.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{other}'",
                ));
            }
        };
        let port = env
            .required("PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let redis = RedisSettings {
            host: env.or("REDIS_HOST", "redis"),
            port: env.parsed_or("REDIS_PORT", 6379)?,
            db: env.parsed_or("REDIS_DB", 0)?,
            password: env.optional("REDIS_PASSWORD"),
        };

        let services = ServiceUrls {
            user: trim_slash(env.required("USER_SERVICE_URL")?),
            account: trim_slash(env.required("ACCOUNT_SERVICE_URL")?),
            pdf: trim_slash(env.required("PDF_SERVICE_URL")?),
        };

        let defaults = NotifierSettings::default();
        let notifier = NotifierSettings {
            queue_capacity: env.parsed_or("NOTIFIER_QUEUE_CAPACITY", defaults.queue_capacity)?,
            max_in_flight: env.parsed_or("NOTIFIER_MAX_IN_FLIGHT", defaults.max_in_flight)?,
        };
        if notifier.queue_capacity == 0 || notifier.max_in_flight == 0 {
            return Err(anyhow!(
                "NOTIFIER_QUEUE_CAPACITY and NOTIFIER_MAX_IN_FLIGHT must be greater than zero"
            ));
        }

        Ok(Self {
            database_url,
            jwt_secret,
            run_migrations,
            port,
            is_dev: env.or("APP_ENV", "development") == "development",
            route_version: env.or("SERVICE_ROUTE_VERSION", "v1"),
            cookie_name: env.or("COOKIE_NAME", "token"),
            redis,
            cache_ttl: Duration::from_secs(env.parsed_or("CACHE_TTL_SECS", 60)?),
            services,
            http_timeout: Duration::from_secs(env.parsed_or("HTTP_CLIENT_TIMEOUT_SECS", 3)?),
            html_template_file: env.or("HTML_TEMPLATE_FILE", "./templates/transaction.html"),
            pdf_template_id: env.optional("PDF_TEMPLATE_ID"),
            notifier,
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String> {
        self.optional(key)
            .with_context(|| format!("Missing env: {key}"))
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.optional(key) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("{key} has an invalid value: '{raw}'")),
            None => Ok(default),
        }
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
