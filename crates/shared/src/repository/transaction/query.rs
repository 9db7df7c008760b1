use crate::{
    abstract_trait::transaction::repository::query::TransactionQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::filter::{FilterValue, TransactionFilter},
    errors::RepositoryError,
    model::transaction::TransactionModel,
};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};

const SELECT_COLUMNS: &str = r#"
    SELECT
        transaction_id,
        user_id,
        account_number,
        amount,
        transfer_to,
        status,
        transaction_type,
        comment,
        created_at,
        updated_at
    FROM transactions"#;

pub struct TransactionQueryRepository {
    db: ConnectionPool,
}

impl TransactionQueryRepository {
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

fn push_conditions(builder: &mut QueryBuilder<'static, Postgres>, filter: &TransactionFilter) {
    for (i, (column, value)) in filter.conditions().iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push(column.as_str());
        builder.push(" = ");
        match value {
            FilterValue::Text(text) => builder.push_bind(text.clone()),
            FilterValue::Integer(number) => builder.push_bind(*number),
        };
    }
}

pub(crate) fn count_query(filter: &TransactionFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM transactions");
    push_conditions(&mut builder, filter);
    builder
}

pub(crate) fn select_query(
    filter: &TransactionFilter,
    limit: i64,
    offset: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_COLUMNS);
    push_conditions(&mut builder, filter);
    builder.push(" ORDER BY created_at ASC");

    if limit > 0 {
        builder.push(" LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset.max(0));
    }

    builder
}

#[async_trait]
impl TransactionQueryRepositoryTrait for TransactionQueryRepository {
    async fn health_check(&self) -> bool {
        match sqlx::query("SELECT 1").execute(&self.db).await {
            Ok(_) => true,
            Err(e) => {
                error!("❌ Database health check failed: {e:?}");
                false
            }
        }
    }

    async fn find(
        &self,
        filter: &TransactionFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TransactionModel>, i64), RepositoryError> {
        let mut conn = self.get_conn().await?;

        let mut count = count_query(filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count transactions: {e:?}");
                RepositoryError::from(e)
            })?;

        let mut select = select_query(filter, limit, offset);
        let rows = select
            .build_query_as::<TransactionModel>()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch transactions: {e:?}");
                RepositoryError::from(e)
            })?;

        info!("🔍 Found {} of {total} transactions", rows.len());

        Ok((rows, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(sql: &str) -> String {
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn empty_filter_has_no_where_clause() {
        let builder = count_query(&TransactionFilter::new());
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM transactions");
    }

    #[test]
    fn conditions_are_anded_and_bound() {
        let filter = TransactionFilter::new()
            .user_id("user-1")
            .account_number(1001);

        let builder = count_query(&filter);
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM transactions WHERE user_id = $1 AND account_number = $2"
        );
    }

    #[test]
    fn positive_limit_pages_the_result() {
        let filter = TransactionFilter::new().user_id("user-1");
        let sql = normalize(select_query(&filter, 5, 10).sql());

        assert!(sql.ends_with(
            "FROM transactions WHERE user_id = $1 ORDER BY created_at ASC LIMIT $2 OFFSET $3"
        ));
    }

    #[test]
    fn non_positive_limit_returns_everything() {
        let filter = TransactionFilter::new().transaction_id("tx-1");
        let sql = normalize(select_query(&filter, 0, 0).sql());

        assert!(sql.ends_with("WHERE transaction_id = $1 ORDER BY created_at ASC"));
        assert!(!sql.contains("LIMIT"));
    }
}
