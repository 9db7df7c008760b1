use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TransactionModel {
    pub transaction_id: String,
    pub user_id: String,
    pub account_number: i64,
    pub amount: Decimal,
    pub transfer_to: i64,
    pub status: String,
    pub transaction_type: String,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Row shape accepted by the store on insert; timestamps are assigned by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransactionModel {
    pub transaction_id: String,
    pub user_id: String,
    pub account_number: i64,
    pub amount: Decimal,
    pub transfer_to: i64,
    pub status: String,
    pub transaction_type: String,
    pub comment: Option<String>,
}
