use thiserror::Error;

/// Failures talking to one of the downstream HTTP services.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    UnexpectedStatus(u16),

    #[error("Failed to read response body: {0}")]
    ReadBody(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected payload: {0}")]
    InvalidPayload(String),
}
