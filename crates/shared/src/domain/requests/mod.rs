pub mod filter;
pub mod transaction;
