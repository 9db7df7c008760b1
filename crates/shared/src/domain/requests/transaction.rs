use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

pub const DEFAULT_LIMIT: i64 = 5;
pub const DEFAULT_PAGE: i64 = 1;
/// Largest page size served; bigger values are clamped.
pub const MAX_LIMIT: i64 = 100;

/// Amounts are stored as NUMERIC(18,2).
const AMOUNT_SCALE: u32 = 2;
const AMOUNT_DIGITS: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Approved,
    Rejected,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Approved => "approved",
            TransactionStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "credit",
            TransactionType::Debit => "debit",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTransactionRequest {
    #[validate(range(min = 1, message = "account number must be positive"))]
    pub account_number: i64,

    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,

    pub transfer_to: i64,

    pub status: TransactionStatus,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    #[serde(default)]
    #[validate(length(max = 255, message = "comment must be at most 255 characters"))]
    pub comment: Option<String>,
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if !amount.is_sign_positive() || amount.is_zero() {
        return Err(
            ValidationError::new("range").with_message("amount must be greater than zero".into()),
        );
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(ValidationError::new("scale")
            .with_message("amount must have at most 2 decimal places".into()));
    }
    if *amount >= Decimal::from(10_i64.pow(AMOUNT_DIGITS)) {
        return Err(ValidationError::new("range")
            .with_message("amount must be below 10000000000000000".into()));
    }
    Ok(())
}

/// Raw pagination query. Values are kept as strings so a bad value falls back
/// to its default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindAllTransactions {
    /// Page size, defaults to 5 and is capped at 100.
    pub limit: Option<String>,
    /// 1-based page number, defaults to 1.
    pub page: Option<String>,
}

impl FindAllTransactions {
    pub fn limit(&self) -> i64 {
        positive_or_default("limit", self.limit.as_deref(), DEFAULT_LIMIT).min(MAX_LIMIT)
    }

    pub fn page(&self) -> i64 {
        positive_or_default("page", self.page.as_deref(), DEFAULT_PAGE)
    }
}

fn positive_or_default(name: &str, raw: Option<&str>, default: i64) -> i64 {
    match raw.map(|value| value.trim().parse::<i64>()) {
        Some(Ok(value)) if value > 0 => value,
        Some(Ok(value)) => {
            info!("ℹ️ {name}={value} is not positive, using default {default}");
            default
        }
        Some(Err(e)) => {
            info!("ℹ️ could not parse {name}: {e}, using default {default}");
            default
        }
        None => {
            info!("ℹ️ {name} not provided, using default {default}");
            default
        }
    }
}

/// Body sent to the account service when an approved transaction is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBalanceRequest {
    pub account_number: i64,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pagination_query_falls_back_to_defaults() {
        let query = FindAllTransactions {
            limit: Some("abc".into()),
            page: Some("0".into()),
        };
        assert_eq!(query.limit(), DEFAULT_LIMIT);
        assert_eq!(query.page(), DEFAULT_PAGE);

        let query = FindAllTransactions::default();
        assert_eq!(query.limit(), 5);
        assert_eq!(query.page(), 1);

        let query = FindAllTransactions {
            limit: Some("-3".into()),
            page: Some("4".into()),
        };
        assert_eq!(query.limit(), 5);
        assert_eq!(query.page(), 4);
    }

    #[test]
    fn create_request_uses_wire_names() {
        let req: CreateTransactionRequest = serde_json::from_value(json!({
            "account_number": 1001,
            "amount": 25.5,
            "transfer_to": 2002,
            "status": "approved",
            "type": "debit",
            "comment": "rent"
        }))
        .unwrap();

        assert_eq!(req.status, TransactionStatus::Approved);
        assert_eq!(req.transaction_type, TransactionType::Debit);
        assert_eq!(req.amount, Decimal::new(255, 1));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn unknown_status_is_rejected_at_decode() {
        let result = serde_json::from_value::<CreateTransactionRequest>(json!({
            "account_number": 1001,
            "amount": 10,
            "transfer_to": 2002,
            "status": "pending",
            "type": "debit"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn non_positive_amount_fails_validation() {
        let req: CreateTransactionRequest = serde_json::from_value(json!({
            "account_number": 1001,
            "amount": 0,
            "transfer_to": 2002,
            "status": "rejected",
            "type": "credit"
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    fn request_with_amount(amount: Decimal) -> CreateTransactionRequest {
        CreateTransactionRequest {
            account_number: 1001,
            amount,
            transfer_to: 2002,
            status: TransactionStatus::Approved,
            transaction_type: TransactionType::Credit,
            comment: None,
        }
    }

    #[test]
    fn amount_with_more_than_two_decimals_fails_validation() {
        let errors = request_with_amount(Decimal::new(1005, 3)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn trailing_zero_decimals_are_accepted() {
        assert!(request_with_amount(Decimal::new(15000, 4)).validate().is_ok());
        assert!(request_with_amount(Decimal::new(1, 2)).validate().is_ok());
    }

    #[test]
    fn amount_must_fit_the_ledger_column() {
        let largest = Decimal::new(9_999_999_999_999_999_99, 2);
        assert!(request_with_amount(largest).validate().is_ok());

        let too_large = Decimal::from(10_000_000_000_000_000_i64);
        let errors = request_with_amount(too_large).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn limit_is_capped() {
        let query = FindAllTransactions {
            limit: Some(i64::MAX.to_string()),
            page: Some(i64::MAX.to_string()),
        };
        assert_eq!(query.limit(), MAX_LIMIT);
        assert_eq!(query.page(), i64::MAX);
    }
}
