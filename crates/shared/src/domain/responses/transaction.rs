use crate::{domain::responses::Paginate, model::transaction::TransactionModel};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub transaction_id: String,
    pub account_number: i64,
    pub amount: Decimal,
    pub transfer_to: i64,
    pub status: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TransactionModel> for TransactionResponse {
    fn from(model: TransactionModel) -> Self {
        Self {
            transaction_id: model.transaction_id,
            account_number: model.account_number,
            amount: model.amount,
            transfer_to: model.transfer_to,
            status: model.status,
            transaction_type: model.transaction_type,
            comment: model.comment,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedTransactions {
    pub transactions: Vec<TransactionResponse>,
    pub pagination: Paginate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub service: String,
    pub healthy: bool,
}
