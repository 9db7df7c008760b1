use crate::{
    abstract_trait::transaction::{
        repository::command::DynTransactionCommandRepository,
        service::command::TransactionCommandServiceTrait,
    },
    client::BalanceNotifier,
    domain::{
        requests::transaction::{CreateTransactionRequest, TransactionStatus, UpdateBalanceRequest},
        responses::ApiResponse,
    },
    errors::{ServiceError, format_validation_errors},
    model::transaction::NewTransactionModel,
    utils::{Method, Metrics, Status as StatusUtils},
};
use anyhow::Result;
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

pub struct TransactionCommandService {
    pub command: DynTransactionCommandRepository,
    pub notifier: BalanceNotifier,
    pub metrics: Metrics,
}

pub struct TransactionCommandServiceDeps {
    pub command: DynTransactionCommandRepository,
    pub notifier: BalanceNotifier,
    pub metrics: Metrics,
}

impl TransactionCommandService {
    pub fn new(deps: TransactionCommandServiceDeps) -> Result<Self> {
        let TransactionCommandServiceDeps {
            command,
            notifier,
            metrics,
        } = deps;

        Ok(Self {
            command,
            notifier,
            metrics,
        })
    }

    fn complete(&self, started: Instant, status: StatusUtils) {
        self.metrics.record(
            "create_transaction",
            Method::Post,
            status,
            started.elapsed().as_secs_f64(),
        );
    }
}

#[async_trait]
impl TransactionCommandServiceTrait for TransactionCommandService {
    #[instrument(skip(self, req), fields(status = %req.status))]
    async fn create(
        &self,
        user_id: &str,
        req: &CreateTransactionRequest,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let started = Instant::now();

        if let Err(errors) = req.validate() {
            self.complete(started, StatusUtils::Error);
            return Err(ServiceError::Validation(format_validation_errors(&errors)));
        }

        let transaction = NewTransactionModel {
            transaction_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            account_number: req.account_number,
            amount: req.amount,
            transfer_to: req.transfer_to,
            status: req.status.as_str().to_string(),
            transaction_type: req.transaction_type.as_str().to_string(),
            comment: req.comment.clone(),
        };

        if let Err(e) = self.command.insert(&transaction).await {
            error!("❌ Failed to record transaction: {e:?}");
            self.complete(started, StatusUtils::Error);
            return Err(ServiceError::NewTransaction);
        }

        info!("✅ Recorded transaction {}", transaction.transaction_id);

        if req.status == TransactionStatus::Approved {
            self.notifier.notify(UpdateBalanceRequest {
                account_number: req.account_number,
                amount: req.amount,
                transaction_type: req.transaction_type,
            });
        }

        self.complete(started, StatusUtils::Success);

        Ok(ApiResponse::success(201, ()))
    }
}
