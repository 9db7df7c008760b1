mod command;
mod query;

pub use self::command::{TransactionCommandService, TransactionCommandServiceDeps};
pub use self::query::{TransactionQueryService, TransactionQueryServiceDeps};
