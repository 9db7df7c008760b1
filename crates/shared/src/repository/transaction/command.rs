use crate::{
    abstract_trait::transaction::repository::command::TransactionCommandRepositoryTrait,
    config::ConnectionPool, errors::RepositoryError, model::transaction::NewTransactionModel,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info};

pub struct TransactionCommandRepository {
    db: ConnectionPool,
}

impl TransactionCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn get_conn(
        &self,
    ) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, RepositoryError> {
        self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {e:?}");
            RepositoryError::from(e)
        })
    }
}

#[async_trait]
impl TransactionCommandRepositoryTrait for TransactionCommandRepository {
    async fn insert(&self, transaction: &NewTransactionModel) -> Result<(), RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query(
            r#"
            INSERT INTO transactions (
                transaction_id,
                user_id,
                account_number,
                amount,
                transfer_to,
                status,
                transaction_type,
                comment
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&transaction.transaction_id)
        .bind(&transaction.user_id)
        .bind(transaction.account_number)
        .bind(transaction.amount)
        .bind(transaction.transfer_to)
        .bind(&transaction.status)
        .bind(&transaction.transaction_type)
        .bind(&transaction.comment)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Database error during transaction creation: {e:?}");
            RepositoryError::from(e)
        })?;

        info!("✅ Inserted transaction {}", transaction.transaction_id);

        Ok(())
    }
}
