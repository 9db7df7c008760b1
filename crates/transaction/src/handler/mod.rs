mod health;
mod transaction;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{Router, extract::DefaultBodyLimit};
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::health::health_routes;
pub use self::transaction::transaction_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        transaction::get_transactions,
        transaction::create_transaction,
        transaction::download_transaction,

        health::health_check,
    ),
    tags(
        (name = "Transaction", description = "Transaction history, recording and receipts"),
        (name = "Health", description = "Service liveness"),
    )
)]
struct ApiDoc;

/// Documents the session cookie under its configured name.
struct SecurityAddon<'a> {
    cookie_name: &'a str,
}

impl Modify for SecurityAddon<'_> {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "cookie_auth",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(self.cookie_name))),
        );
    }
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: Arc<AppState>) -> Router {
        let mut doc = ApiDoc::openapi();
        SecurityAddon {
            cookie_name: &app_state.settings.cookie_name,
        }
        .modify(&mut doc);

        let api_router = OpenApiRouter::with_openapi(doc)
            .merge(transaction_routes(app_state.clone()))
            .merge(health_routes(app_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(1024 * 1024))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(Arc::new(app_state));

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::FixtureBuilder;
    use serde_json::Value;

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let fixture = FixtureBuilder::default().build();

        let response = fixture.server.get("/api-docs/openapi.json").await;

        response.assert_status_ok();
        let doc: Value = response.json();
        let paths = doc["paths"].as_object().unwrap();
        assert!(paths.contains_key("/v1/transactions"));
        assert!(paths.contains_key("/v1/transactions/new"));
        assert!(paths.contains_key("/v1/transactions/download/{transaction_id}"));
        assert!(paths.contains_key("/health"));
    }

    #[tokio::test]
    async fn openapi_documents_configured_cookie() {
        let fixture = FixtureBuilder::default().cookie_name("session").build();

        let response = fixture.server.get("/api-docs/openapi.json").await;

        response.assert_status_ok();
        let doc: Value = response.json();
        let scheme = &doc["components"]["securitySchemes"]["cookie_auth"];
        assert_eq!(scheme["in"], "cookie");
        assert_eq!(scheme["name"], "session");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let fixture = FixtureBuilder::default().build();

        fixture.server.get("/v2/transactions").await.assert_status_not_found();
    }
}
