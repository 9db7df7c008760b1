mod api;
mod pagination;
mod transaction;

pub use self::api::{ApiResponse, SUCCESS_MESSAGE};
pub use self::pagination::{NO_NEXT_PAGE, Paginate};
pub use self::transaction::{HealthResponse, PaginatedTransactions, TransactionResponse};
