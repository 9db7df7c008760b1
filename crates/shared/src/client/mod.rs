mod account_balance;
mod notifier;
mod pdf;
mod user_profile;

pub use self::account_balance::AccountBalanceClient;
pub use self::notifier::BalanceNotifier;
pub use self::pdf::PdfRendererClient;
pub use self::user_profile::UserProfileClient;

use crate::errors::ClientError;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Shared client for every downstream call; `timeout` bounds each request end to end.
pub fn create_client(timeout: Duration) -> Result<Client, ClientError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// `{status, message, data}` envelope spoken by the sibling services.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}
