use crate::state::AppState;
use axum::{
    Json,
    extract::Extension,
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::transaction::service::query::DynTransactionQueryService,
    domain::responses::{ApiResponse, HealthResponse, SUCCESS_MESSAGE},
    errors::{AppErrorHttp, ServiceError},
    utils::render_metrics,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Store is reachable", body = ApiResponse<HealthResponse>),
        (status = 503, description = "Store is unreachable", body = ApiResponse<HealthResponse>)
    )
)]
pub async fn health_check(
    Extension(service): Extension<DynTransactionQueryService>,
) -> impl IntoResponse {
    let healthy = service.health_check().await;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = ApiResponse {
        status: status.as_u16(),
        message: if healthy { SUCCESS_MESSAGE } else { "UNAVAILABLE" }.to_string(),
        data: HealthResponse {
            service: "transaction".to_string(),
            healthy,
        },
    };

    (status, Json(body))
}

pub async fn metrics_handler(
    Extension(registry): Extension<Arc<Registry>>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let body = render_metrics(&registry)
        .map_err(|e| ServiceError::InternalServerError(format!("failed to encode metrics: {e}")))?;

    Ok((
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        body,
    ))
}

pub fn health_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(Extension(app_state.di_container.transaction_query.clone()))
        .layer(Extension(app_state.registry.clone()))
}
