use crate::{errors::RepositoryError, model::transaction::NewTransactionModel};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTransactionCommandRepository =
    Arc<dyn TransactionCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait TransactionCommandRepositoryTrait {
    async fn insert(&self, transaction: &NewTransactionModel) -> Result<(), RepositoryError>;
}
