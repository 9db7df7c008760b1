mod cache;
mod client;
mod error;
mod http;
mod repository;
mod service;
mod token;
mod validate;

pub use self::cache::CacheError;
pub use self::client::ClientError;
pub use self::error::ErrorResponse;
pub use self::http::AppErrorHttp;
pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
pub use self::token::TokenError;
pub use self::validate::format_validation_errors;
