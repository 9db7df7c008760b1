pub mod cache;
pub mod external;
pub mod jwt;
pub mod transaction;
