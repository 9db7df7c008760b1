use crate::{
    abstract_trait::external::PdfRendererClientTrait, client::Envelope, errors::ClientError,
};
use async_trait::async_trait;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde_json::{Map, Value};
use tracing::{error, info};

/// Client for the HTML-to-PDF rendering service.
pub struct PdfRendererClient {
    base_url: String,
    client: Client,
}

impl PdfRendererClient {
    pub fn new(base_url: String, client: Client) -> Self {
        Self { base_url, client }
    }
}

#[async_trait]
impl PdfRendererClientTrait for PdfRendererClient {
    async fn register_template(
        &self,
        file_name: &str,
        html: Vec<u8>,
    ) -> Result<String, ClientError> {
        let part = Part::bytes(html)
            .file_name(file_name.to_string())
            .mime_str("text/html")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/v1/register", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("❌ Template registration answered {status}");
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        let envelope: Envelope = response.json().await?;
        let id = match envelope.data {
            Value::String(id) => Some(id),
            Value::Object(map) => map.get("id").and_then(Value::as_str).map(str::to_string),
            _ => None,
        };

        match id {
            Some(id) => {
                info!("✅ Registered pdf template {file_name} as {id}");
                Ok(id)
            }
            None => Err(ClientError::InvalidPayload(format!(
                "no template id in registration response ({})",
                envelope.message.unwrap_or_default()
            ))),
        }
    }

    async fn generate_pdf(
        &self,
        template_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<Vec<u8>, ClientError> {
        let response = self
            .client
            .post(format!("{}/v1/generate/{template_id}", self.base_url))
            .json(fields)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("❌ Pdf rendering answered {status}");
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        let pdf = response
            .bytes()
            .await
            .map_err(|e| ClientError::ReadBody(e.to_string()))?;

        Ok(pdf.to_vec())
    }
}
