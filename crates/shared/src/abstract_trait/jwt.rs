use crate::errors::{ServiceError, TokenError};
use chrono::Duration;
use serde_json::Value;
use std::sync::Arc;

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;

pub trait JwtServiceTrait {
    fn generate_token(&self, user_id: &str, validity: Duration) -> Result<String, ServiceError>;

    /// Returns the decoded claims of a signed, unexpired token.
    fn verify_token(&self, token: &str) -> Result<Value, TokenError>;
}
