use crate::{
    abstract_trait::{
        external::{DynPdfRendererClient, DynUserProfileClient},
        transaction::{
            repository::query::DynTransactionQueryRepository,
            service::query::TransactionQueryServiceTrait,
        },
    },
    domain::{
        requests::{
            filter::TransactionFilter,
            transaction::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT},
        },
        responses::{ApiResponse, PaginatedTransactions, Paginate, TransactionResponse},
    },
    errors::{ClientError, ServiceError},
    model::transaction::TransactionModel,
    utils::{Method, Metrics, Status as StatusUtils},
};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tokio::time::Instant;
use tracing::{error, info, instrument};

pub struct TransactionQueryService {
    pub query: DynTransactionQueryRepository,
    pub user_profile: DynUserProfileClient,
    pub pdf_renderer: DynPdfRendererClient,
    pub template_id: String,
    pub metrics: Metrics,
}

pub struct TransactionQueryServiceDeps {
    pub query: DynTransactionQueryRepository,
    pub user_profile: DynUserProfileClient,
    pub pdf_renderer: DynPdfRendererClient,
    pub template_id: String,
    pub metrics: Metrics,
}

impl TransactionQueryService {
    pub fn new(deps: TransactionQueryServiceDeps) -> Result<Self> {
        let TransactionQueryServiceDeps {
            query,
            user_profile,
            pdf_renderer,
            template_id,
            metrics,
        } = deps;

        Ok(Self {
            query,
            user_profile,
            pdf_renderer,
            template_id,
            metrics,
        })
    }

    fn complete(&self, operation: &str, started: Instant, status: StatusUtils) {
        self.metrics.record(
            operation,
            Method::Get,
            status,
            started.elapsed().as_secs_f64(),
        );
    }

    fn fail(&self, operation: &str, started: Instant, err: ServiceError) -> ServiceError {
        self.complete(operation, started, StatusUtils::Error);
        err
    }
}

fn profile_error(err: ClientError) -> ServiceError {
    match err {
        ClientError::Decode(_) => ServiceError::DecodeUserProfile,
        ClientError::InvalidPayload(_) => ServiceError::InvalidUserProfile,
        ClientError::ReadBody(msg) => ServiceError::ReadBody(msg),
        ClientError::Request(_) | ClientError::UnexpectedStatus(_) => {
            ServiceError::FetchUserProfile
        }
    }
}

/// Template fields for the transaction receipt.
fn receipt_fields(transaction: &TransactionModel, profile: &Map<String, Value>) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert(
        "Name".into(),
        profile.get("name").cloned().unwrap_or(Value::Null),
    );
    fields.insert(
        "TransferFromAccountNumber".into(),
        json!(transaction.account_number),
    );
    fields.insert("TransferToAccountNumber".into(), json!(transaction.transfer_to));
    fields.insert("TransactionId".into(), json!(transaction.transaction_id));
    fields.insert("Amount".into(), json!(transaction.amount));
    fields.insert(
        "Date".into(),
        json!(transaction.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
    );
    fields.insert("Status".into(), json!(transaction.status));
    fields.insert("Type".into(), json!(transaction.transaction_type));
    fields.insert(
        "Comment".into(),
        json!(transaction.comment.clone().unwrap_or_default()),
    );
    fields
}

#[async_trait]
impl TransactionQueryServiceTrait for TransactionQueryService {
    async fn health_check(&self) -> bool {
        self.query.health_check().await
    }

    #[instrument(skip(self))]
    async fn get_transactions(
        &self,
        user_id: &str,
        limit: i64,
        page: i64,
    ) -> Result<ApiResponse<PaginatedTransactions>, ServiceError> {
        const OPERATION: &str = "get_transactions";
        let started = Instant::now();

        let limit = if limit > 0 {
            limit.min(MAX_LIMIT)
        } else {
            DEFAULT_LIMIT
        };
        let page = if page > 0 { page } else { DEFAULT_PAGE };
        // Pages past i64 range are simply past the end.
        let offset = (page - 1).saturating_mul(limit);

        info!("🔍 Listing transactions | limit: {limit}, page: {page}");

        let filter = TransactionFilter::new().user_id(user_id);
        let (rows, total) = match self.query.find(&filter, limit, offset).await {
            Ok(found) => found,
            Err(e) => {
                error!("❌ Failed to fetch transactions: {e:?}");
                return Err(self.fail(OPERATION, started, ServiceError::GetTransaction));
            }
        };

        let response = PaginatedTransactions {
            transactions: rows.into_iter().map(TransactionResponse::from).collect(),
            pagination: Paginate::new(total, limit, page),
        };

        info!(
            "✅ Found {} transactions (total: {total})",
            response.transactions.len()
        );
        self.complete(OPERATION, started, StatusUtils::Success);

        Ok(ApiResponse::success(200, response))
    }

    #[instrument(skip(self, cookie))]
    async fn download_transaction(
        &self,
        transaction_id: &str,
        cookie: &str,
    ) -> Result<Vec<u8>, ServiceError> {
        const OPERATION: &str = "download_transaction";
        let started = Instant::now();

        let filter = TransactionFilter::new().transaction_id(transaction_id);
        let transaction = match self.query.find(&filter, 0, 0).await {
            Ok((rows, _)) => rows.into_iter().next(),
            Err(e) => {
                error!("❌ Failed to fetch transaction {transaction_id}: {e:?}");
                return Err(self.fail(OPERATION, started, ServiceError::GetTransaction));
            }
        };

        let Some(transaction) = transaction else {
            info!("🔍 Transaction {transaction_id} not found");
            return Err(self.fail(
                OPERATION,
                started,
                ServiceError::TransactionNotFound(transaction_id.to_string()),
            ));
        };

        let profile = match self.user_profile.fetch_profile(cookie).await {
            Ok(profile) => profile,
            Err(e) => {
                error!("❌ Failed to fetch user profile: {e}");
                return Err(self.fail(OPERATION, started, profile_error(e)));
            }
        };

        let fields = receipt_fields(&transaction, &profile);
        let pdf = match self
            .pdf_renderer
            .generate_pdf(&self.template_id, &fields)
            .await
        {
            Ok(pdf) => pdf,
            Err(e) => {
                error!("❌ Failed to render receipt for {transaction_id}: {e}");
                return Err(self.fail(OPERATION, started, ServiceError::Pdf));
            }
        };

        info!("✅ Rendered receipt for {transaction_id} ({} bytes)", pdf.len());
        self.complete(OPERATION, started, StatusUtils::Success);

        Ok(pdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::responses::NO_NEXT_PAGE,
        testing::{
            InMemoryTransactionRepository, ProfileOutcome, StubPdfRendererClient,
            StubUserProfileClient, transactions_for,
        },
    };
    use std::sync::Arc;

    struct Fixture {
        repo: Arc<InMemoryTransactionRepository>,
        profile: Arc<StubUserProfileClient>,
        pdf: Arc<StubPdfRendererClient>,
        service: TransactionQueryService,
    }

    fn fixture(
        repo: InMemoryTransactionRepository,
        profile: StubUserProfileClient,
        pdf: StubPdfRendererClient,
    ) -> Fixture {
        let repo = Arc::new(repo);
        let profile = Arc::new(profile);
        let pdf = Arc::new(pdf);
        let service = TransactionQueryService::new(TransactionQueryServiceDeps {
            query: repo.clone(),
            user_profile: profile.clone(),
            pdf_renderer: pdf.clone(),
            template_id: "template-1".into(),
            metrics: Metrics::new(),
        })
        .unwrap();

        Fixture {
            repo,
            profile,
            pdf,
            service,
        }
    }

    fn default_fixture(rows: usize) -> Fixture {
        fixture(
            InMemoryTransactionRepository::with_rows(transactions_for("user-1", rows)),
            StubUserProfileClient::with_name("Ada"),
            StubPdfRendererClient::returning(b"%PDF-1.4"),
        )
    }

    #[tokio::test]
    async fn first_page_reports_next_and_total() {
        let f = default_fixture(100);

        let response = f.service.get_transactions("user-1", 5, 1).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.message, "SUCCESS");
        assert_eq!(response.data.transactions.len(), 5);
        assert_eq!(response.data.transactions[0].transaction_id, "tx-0");
        assert_eq!(
            response.data.pagination,
            Paginate {
                current_page: 1,
                next_page: 2,
                total_page: 20
            }
        );
    }

    #[tokio::test]
    async fn only_callers_rows_are_listed() {
        let mut rows = transactions_for("user-1", 3);
        rows.extend(
            transactions_for("user-2", 4)
                .into_iter()
                .map(|mut row| {
                    row.transaction_id = format!("other-{}", row.transaction_id);
                    row
                }),
        );
        let f = fixture(
            InMemoryTransactionRepository::with_rows(rows),
            StubUserProfileClient::with_name("Ada"),
            StubPdfRendererClient::returning(b"%PDF"),
        );

        let response = f.service.get_transactions("user-2", 5, 1).await.unwrap();
        assert_eq!(response.data.transactions.len(), 4);
        assert_eq!(response.data.pagination.next_page, NO_NEXT_PAGE);
        assert_eq!(response.data.pagination.total_page, 1);
    }

    #[tokio::test]
    async fn oversized_limit_is_clamped() {
        let f = default_fixture(150);

        let response = f.service.get_transactions("user-1", i64::MAX, 1).await.unwrap();

        assert_eq!(response.data.transactions.len(), 100);
        assert_eq!(
            response.data.pagination,
            Paginate {
                current_page: 1,
                next_page: 2,
                total_page: 2
            }
        );
    }

    #[tokio::test]
    async fn page_beyond_range_is_empty() {
        let f = default_fixture(12);

        let response = f.service.get_transactions("user-1", 5, i64::MAX).await.unwrap();

        assert!(response.data.transactions.is_empty());
        assert_eq!(response.data.pagination.current_page, i64::MAX);
        assert_eq!(response.data.pagination.next_page, NO_NEXT_PAGE);
        assert_eq!(response.data.pagination.total_page, 3);
    }

    #[tokio::test]
    async fn store_failure_maps_to_get_transaction() {
        let f = default_fixture(3);
        f.repo.fail_reads();

        let err = f.service.get_transactions("user-1", 5, 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::GetTransaction));
    }

    #[tokio::test]
    async fn unknown_transaction_fails_before_any_external_call() {
        let f = default_fixture(3);

        let err = f
            .service
            .download_transaction("missing", "token")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::TransactionNotFound(_)));
        assert!(f.profile.calls().is_empty());
        assert!(f.pdf.renders().is_empty());
    }

    #[tokio::test]
    async fn download_renders_receipt_with_profile_name() {
        let f = default_fixture(3);

        let pdf = f
            .service
            .download_transaction("tx-1", "bearer-token")
            .await
            .unwrap();

        assert_eq!(pdf, b"%PDF-1.4");
        assert_eq!(f.profile.calls(), vec!["bearer-token".to_string()]);

        let renders = f.pdf.renders();
        assert_eq!(renders.len(), 1);
        let (template_id, fields) = &renders[0];
        assert_eq!(template_id, "template-1");
        assert_eq!(fields["Name"], "Ada");
        assert_eq!(fields["TransactionId"], "tx-1");
        assert_eq!(fields["TransferFromAccountNumber"], 1001);
        assert_eq!(fields["TransferToAccountNumber"], 2002);
        assert_eq!(fields["Amount"], 25.0);
        assert_eq!(fields["Status"], "approved");
        assert_eq!(fields["Type"], "debit");
        assert_eq!(fields["Comment"], "groceries");
    }

    #[tokio::test]
    async fn user_service_failures_are_distinguished() {
        let cases = [
            (ProfileOutcome::Unavailable, "fetch"),
            (ProfileOutcome::Undecodable, "decode"),
            (ProfileOutcome::NotAnObject, "shape"),
        ];

        for (outcome, label) in cases {
            let f = fixture(
                InMemoryTransactionRepository::with_rows(transactions_for("user-1", 1)),
                StubUserProfileClient::new(outcome),
                StubPdfRendererClient::returning(b"%PDF"),
            );

            let err = f
                .service
                .download_transaction("tx-0", "token")
                .await
                .unwrap_err();

            match label {
                "fetch" => assert!(matches!(err, ServiceError::FetchUserProfile)),
                "decode" => assert!(matches!(err, ServiceError::DecodeUserProfile)),
                _ => assert!(matches!(err, ServiceError::InvalidUserProfile)),
            }
            assert!(f.pdf.renders().is_empty());
        }
    }

    #[tokio::test]
    async fn renderer_failure_maps_to_pdf_error() {
        let f = fixture(
            InMemoryTransactionRepository::with_rows(transactions_for("user-1", 1)),
            StubUserProfileClient::with_name("Ada"),
            StubPdfRendererClient::failing(),
        );

        let err = f
            .service
            .download_transaction("tx-0", "token")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Pdf));
    }

    #[tokio::test]
    async fn lookup_failure_maps_to_get_transaction() {
        let f = default_fixture(1);
        f.repo.fail_reads();

        let err = f
            .service
            .download_transaction("tx-0", "token")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::GetTransaction));
        assert!(f.profile.calls().is_empty());
    }
}
