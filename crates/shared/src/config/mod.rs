mod database;
mod jwt;
mod myconfig;
mod redis;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::jwt::JwtConfig;
pub use self::myconfig::{Config, NotifierSettings, RedisSettings, ServiceUrls};
pub use self::redis::{RedisConfig, RedisPool};
