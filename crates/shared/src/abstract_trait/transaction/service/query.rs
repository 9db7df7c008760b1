use crate::{
    domain::responses::{ApiResponse, PaginatedTransactions},
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTransactionQueryService = Arc<dyn TransactionQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait TransactionQueryServiceTrait {
    async fn health_check(&self) -> bool;

    async fn get_transactions(
        &self,
        user_id: &str,
        limit: i64,
        page: i64,
    ) -> Result<ApiResponse<PaginatedTransactions>, ServiceError>;

    /// Renders the receipt for `transaction_id` as PDF bytes. `cookie` is the
    /// caller's bearer token, forwarded to the user service.
    async fn download_transaction(
        &self,
        transaction_id: &str,
        cookie: &str,
    ) -> Result<Vec<u8>, ServiceError>;
}
