use crate::{
    abstract_trait::external::AccountBalanceClientTrait,
    domain::requests::transaction::UpdateBalanceRequest, errors::ClientError,
};
use async_trait::async_trait;
use reqwest::Client;

pub struct AccountBalanceClient {
    base_url: String,
    client: Client,
}

impl AccountBalanceClient {
    pub fn new(base_url: String, client: Client) -> Self {
        Self { base_url, client }
    }
}

#[async_trait]
impl AccountBalanceClientTrait for AccountBalanceClient {
    async fn update_balance(&self, req: &UpdateBalanceRequest) -> Result<(), ClientError> {
        let response = self
            .client
            .put(format!("{}/account/update/transaction", self.base_url))
            .json(req)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::UnexpectedStatus(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::transaction::TransactionType;
    use axum::{Json, Router, http::StatusCode, routing::put};
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tokio::{net::TcpListener, sync::mpsc};

    async fn spawn(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base_url: String) -> AccountBalanceClient {
        let http = crate::client::create_client(Duration::from_secs(3)).unwrap();
        AccountBalanceClient::new(base_url, http)
    }

    fn credit() -> UpdateBalanceRequest {
        UpdateBalanceRequest {
            account_number: 1001,
            amount: Decimal::new(425, 1),
            transaction_type: TransactionType::Credit,
        }
    }

    #[tokio::test]
    async fn puts_snake_case_body_to_update_route() {
        let (tx, mut rx) = mpsc::unbounded_channel::<Value>();
        let app = Router::new().route(
            "/account/update/transaction",
            put(move |Json(body): Json<Value>| {
                let tx = tx.clone();
                async move {
                    tx.send(body).unwrap();
                    StatusCode::OK
                }
            }),
        );
        let client = client_for(spawn(app).await);

        client.update_balance(&credit()).await.unwrap();

        let body = rx.recv().await.unwrap();
        assert_eq!(
            body,
            json!({
                "account_number": 1001,
                "amount": 42.5,
                "transaction_type": "credit"
            })
        );
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let app = Router::new().route(
            "/account/update/transaction",
            put(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let client = client_for(spawn(app).await);

        let err = client.update_balance(&credit()).await.unwrap_err();

        assert!(matches!(err, ClientError::UnexpectedStatus(500)));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client_for(format!("http://{addr}"));

        let err = client.update_balance(&credit()).await.unwrap_err();

        assert!(matches!(err, ClientError::Request(_)));
    }
}
