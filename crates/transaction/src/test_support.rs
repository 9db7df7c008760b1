//! Router fixture wired to in-memory stores and stub downstream services.

use crate::{
    di::DependenciesInject,
    handler::AppRouter,
    state::{AppState, RouteSettings},
};
use axum_test::TestServer;
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{
        jwt::{DynJwtService, JwtServiceTrait},
        transaction::service::{
            command::DynTransactionCommandService, query::DynTransactionQueryService,
        },
    },
    cache::CacheStore,
    client::BalanceNotifier,
    config::{JwtConfig, NotifierSettings},
    domain::requests::transaction::UpdateBalanceRequest,
    model::transaction::TransactionModel,
    service::transaction::{
        TransactionCommandService, TransactionCommandServiceDeps, TransactionQueryService,
        TransactionQueryServiceDeps,
    },
    testing::{
        InMemoryCacheBackend, InMemoryTransactionRepository, ProfileOutcome,
        RecordingBalanceClient, StubPdfRendererClient, StubUserProfileClient,
    },
    utils::Metrics,
};
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc::UnboundedReceiver;

const SECRET: &str = "fixture-secret";

pub(crate) struct Fixture {
    pub server: TestServer,
    pub repo: Arc<InMemoryTransactionRepository>,
    pub cache: Arc<InMemoryCacheBackend>,
    pub profiles: Arc<StubUserProfileClient>,
    pub pdf: Arc<StubPdfRendererClient>,
    pub balance_updates: UnboundedReceiver<UpdateBalanceRequest>,
}

impl Fixture {
    pub fn token(&self, user_id: &str) -> String {
        JwtConfig::new(SECRET)
            .generate_token(user_id, chrono::Duration::minutes(5))
            .unwrap()
    }
}

pub(crate) struct FixtureBuilder {
    rows: Vec<TransactionModel>,
    profile: ProfileOutcome,
    pdf: StubPdfRendererClient,
    cookie_name: String,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            profile: ProfileOutcome::Profile(
                serde_json::json!({ "name": "Jane Doe" })
                    .as_object()
                    .cloned()
                    .unwrap_or_default(),
            ),
            pdf: StubPdfRendererClient::returning(b"%PDF-1.4"),
            cookie_name: "token".to_string(),
        }
    }
}

impl FixtureBuilder {
    pub fn rows(mut self, rows: Vec<TransactionModel>) -> Self {
        self.rows = rows;
        self
    }

    pub fn profile(mut self, outcome: ProfileOutcome) -> Self {
        self.profile = outcome;
        self
    }

    pub fn pdf(mut self, bytes: &[u8]) -> Self {
        self.pdf = StubPdfRendererClient::returning(bytes);
        self
    }

    pub fn failing_pdf(mut self) -> Self {
        self.pdf = StubPdfRendererClient::failing();
        self
    }

    pub fn cookie_name(mut self, name: &str) -> Self {
        self.cookie_name = name.to_string();
        self
    }

    pub fn build(self) -> Fixture {
        let repo = Arc::new(InMemoryTransactionRepository::with_rows(self.rows));
        let cache = Arc::new(InMemoryCacheBackend::default());
        let profiles = Arc::new(StubUserProfileClient::new(self.profile));
        let pdf = Arc::new(self.pdf);
        let (balance, balance_updates) = RecordingBalanceClient::new();

        let metrics = Metrics::new();
        let mut registry = Registry::with_prefix("transaction");
        metrics.register(&mut registry);

        let transaction_query = Arc::new(
            TransactionQueryService::new(TransactionQueryServiceDeps {
                query: repo.clone(),
                user_profile: profiles.clone(),
                pdf_renderer: pdf.clone(),
                template_id: "template-1".to_string(),
                metrics: metrics.clone(),
            })
            .unwrap(),
        ) as DynTransactionQueryService;

        let transaction_command = Arc::new(
            TransactionCommandService::new(TransactionCommandServiceDeps {
                command: repo.clone(),
                notifier: BalanceNotifier::spawn(Arc::new(balance), NotifierSettings::default()),
                metrics,
            })
            .unwrap(),
        ) as DynTransactionCommandService;

        let state = AppState {
            jwt_config: Arc::new(JwtConfig::new(SECRET)) as DynJwtService,
            cache_store: Arc::new(CacheStore::new(cache.clone())),
            di_container: DependenciesInject {
                transaction_query,
                transaction_command,
            },
            settings: RouteSettings {
                route_version: "v1".to_string(),
                cookie_name: self.cookie_name,
                cache_ttl: Duration::from_secs(60),
            },
            registry: Arc::new(registry),
        };

        Fixture {
            server: TestServer::new(AppRouter::build(Arc::new(state))).unwrap(),
            repo,
            cache,
            profiles,
            pdf,
            balance_updates,
        }
    }
}
