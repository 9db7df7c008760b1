pub mod cache;
pub mod jwt;
pub mod validate;
