use anyhow::{Context, Result};
use shared::{
    abstract_trait::{
        external::{DynAccountBalanceClient, DynPdfRendererClient, DynUserProfileClient},
        transaction::{
            repository::{
                command::DynTransactionCommandRepository, query::DynTransactionQueryRepository,
            },
            service::{command::DynTransactionCommandService, query::DynTransactionQueryService},
        },
    },
    client::{
        AccountBalanceClient, BalanceNotifier, PdfRendererClient, UserProfileClient,
        create_client,
    },
    config::{Config, ConnectionPool},
    repository::transaction::{
        command::TransactionCommandRepository, query::TransactionQueryRepository,
    },
    service::transaction::{
        TransactionCommandService, TransactionCommandServiceDeps, TransactionQueryService,
        TransactionQueryServiceDeps,
    },
    utils::Metrics,
};
use std::{path::Path, sync::Arc};
use tracing::info;

#[derive(Clone)]
pub struct DependenciesInject {
    pub transaction_query: DynTransactionQueryService,
    pub transaction_command: DynTransactionCommandService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("transaction_query", &"DynTransactionQueryService")
            .field("transaction_command", &"DynTransactionCommandService")
            .finish()
    }
}

pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub config: Config,
    pub metrics: Metrics,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Result<Self> {
        let DependenciesInjectDeps {
            pool,
            config,
            metrics,
        } = deps;

        let http = create_client(config.http_timeout).context("failed to build http client")?;

        let user_profile = Arc::new(UserProfileClient::new(
            config.services.user.clone(),
            config.cookie_name.clone(),
            http.clone(),
        )) as DynUserProfileClient;
        let pdf_renderer = Arc::new(PdfRendererClient::new(
            config.services.pdf.clone(),
            http.clone(),
        )) as DynPdfRendererClient;
        let account_balance = Arc::new(AccountBalanceClient::new(
            config.services.account.clone(),
            http,
        )) as DynAccountBalanceClient;

        let template_id = resolve_template_id(&config, &pdf_renderer).await?;

        let query_repo =
            Arc::new(TransactionQueryRepository::new(pool.clone())) as DynTransactionQueryRepository;
        let command_repo =
            Arc::new(TransactionCommandRepository::new(pool)) as DynTransactionCommandRepository;

        let transaction_query = Arc::new(
            TransactionQueryService::new(TransactionQueryServiceDeps {
                query: query_repo,
                user_profile,
                pdf_renderer,
                template_id,
                metrics: metrics.clone(),
            })
            .context("failed initialize transaction query service")?,
        ) as DynTransactionQueryService;

        let transaction_command = Arc::new(
            TransactionCommandService::new(TransactionCommandServiceDeps {
                command: command_repo,
                notifier: BalanceNotifier::spawn(account_balance, config.notifier),
                metrics,
            })
            .context("failed initialize transaction command service")?,
        ) as DynTransactionCommandService;

        Ok(Self {
            transaction_query,
            transaction_command,
        })
    }
}

/// Uses `PDF_TEMPLATE_ID` when set, otherwise uploads the receipt template.
pub async fn resolve_template_id(
    config: &Config,
    pdf_renderer: &DynPdfRendererClient,
) -> Result<String> {
    if let Some(template_id) = &config.pdf_template_id {
        info!("📄 Using configured pdf template {template_id}");
        return Ok(template_id.clone());
    }

    let html = tokio::fs::read(&config.html_template_file)
        .await
        .with_context(|| format!("failed to read template {}", config.html_template_file))?;

    let file_name = Path::new(&config.html_template_file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("transaction.html");

    pdf_renderer
        .register_template(file_name, html)
        .await
        .context("failed to register receipt template")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::testing::StubPdfRendererClient;

    fn config(template_id: Option<&str>, template_file: &str) -> Config {
        let mut config = Config::from_lookup(|key| {
            let value = match key {
                "DATABASE_URL" => "postgres://localhost/ledger",
                "JWT_SECRET" => "secret",
                "RUN_MIGRATIONS" => "false",
                "PORT" => "8080",
                "USER_SERVICE_URL" | "ACCOUNT_SERVICE_URL" | "PDF_SERVICE_URL" => "http://svc",
                _ => return None,
            };
            Some(value.to_string())
        })
        .unwrap();
        config.pdf_template_id = template_id.map(str::to_string);
        config.html_template_file = template_file.to_string();
        config
    }

    #[tokio::test]
    async fn configured_template_id_skips_registration() {
        let renderer = Arc::new(StubPdfRendererClient::returning(b"")) as DynPdfRendererClient;
        let config = config(Some("fixed-id"), "/does/not/exist.html");

        let id = resolve_template_id(&config, &renderer).await.unwrap();
        assert_eq!(id, "fixed-id");
    }

    #[tokio::test]
    async fn bundled_template_is_registered() {
        let renderer = Arc::new(StubPdfRendererClient::returning(b"")) as DynPdfRendererClient;
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/templates/transaction.html");
        let config = config(None, path);

        let id = resolve_template_id(&config, &renderer).await.unwrap();
        assert_eq!(id, "template-1");
    }

    #[tokio::test]
    async fn missing_template_file_is_an_error() {
        let renderer = Arc::new(StubPdfRendererClient::returning(b"")) as DynPdfRendererClient;
        let config = config(None, "/does/not/exist.html");

        assert!(resolve_template_id(&config, &renderer).await.is_err());
    }
}
