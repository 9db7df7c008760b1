use crate::{
    domain::{requests::transaction::CreateTransactionRequest, responses::ApiResponse},
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTransactionCommandService = Arc<dyn TransactionCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait TransactionCommandServiceTrait {
    async fn create(
        &self,
        user_id: &str,
        req: &CreateTransactionRequest,
    ) -> Result<ApiResponse<()>, ServiceError>;
}
