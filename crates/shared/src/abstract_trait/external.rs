use crate::{domain::requests::transaction::UpdateBalanceRequest, errors::ClientError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

pub type DynUserProfileClient = Arc<dyn UserProfileClientTrait + Send + Sync>;
pub type DynPdfRendererClient = Arc<dyn PdfRendererClientTrait + Send + Sync>;
pub type DynAccountBalanceClient = Arc<dyn AccountBalanceClientTrait + Send + Sync>;

#[async_trait]
pub trait UserProfileClientTrait {
    /// Profile of the user owning `token`, as the `data` object of the user service envelope.
    async fn fetch_profile(&self, token: &str) -> Result<Map<String, Value>, ClientError>;
}

#[async_trait]
pub trait PdfRendererClientTrait {
    /// Uploads an HTML template and returns the id used for later renders.
    async fn register_template(&self, file_name: &str, html: Vec<u8>)
    -> Result<String, ClientError>;

    async fn generate_pdf(
        &self,
        template_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<Vec<u8>, ClientError>;
}

#[async_trait]
pub trait AccountBalanceClientTrait {
    async fn update_balance(&self, req: &UpdateBalanceRequest) -> Result<(), ClientError>;
}
