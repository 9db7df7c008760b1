use crate::{
    domain::requests::filter::TransactionFilter, errors::RepositoryError,
    model::transaction::TransactionModel,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTransactionQueryRepository = Arc<dyn TransactionQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait TransactionQueryRepositoryTrait {
    /// `true` when the store answers a trivial query.
    async fn health_check(&self) -> bool;

    /// Rows matching `filter` ordered by `created_at`, plus the total match count.
    /// A `limit` of zero or less returns every match and ignores `offset`.
    async fn find(
        &self,
        filter: &TransactionFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TransactionModel>, i64), RepositoryError>;
}
