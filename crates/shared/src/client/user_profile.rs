use crate::{
    abstract_trait::external::UserProfileClientTrait, client::Envelope, errors::ClientError,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::COOKIE};
use serde_json::{Map, Value};
use tracing::{error, info};

pub struct UserProfileClient {
    base_url: String,
    cookie_name: String,
    client: Client,
}

impl UserProfileClient {
    pub fn new(base_url: String, cookie_name: String, client: Client) -> Self {
        Self {
            base_url,
            cookie_name,
            client,
        }
    }
}

#[async_trait]
impl UserProfileClientTrait for UserProfileClient {
    async fn fetch_profile(&self, token: &str) -> Result<Map<String, Value>, ClientError> {
        let url = format!("{}/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(COOKIE, format!("{}={}", self.cookie_name, token))
            .send()
            .await
            .map_err(|e| {
                error!("❌ User service unreachable at {url}: {e}");
                ClientError::from(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!("❌ User service answered {status}");
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::ReadBody(e.to_string()))?;

        let envelope: Envelope = serde_json::from_slice(&body)?;

        match envelope.data {
            Value::Object(profile) => {
                info!("✅ Fetched user profile");
                Ok(profile)
            }
            other => Err(ClientError::InvalidPayload(format!(
                "expected user object, got {other} ({})",
                envelope.message.unwrap_or_default()
            ))),
        }
    }
}
