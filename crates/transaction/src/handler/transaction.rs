use crate::{
    middleware::{
        cache::{self, CacheState},
        jwt::{self, AuthSettings},
        validate::SimpleValidatedJson,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::transaction::service::{
        command::DynTransactionCommandService, query::DynTransactionQueryService,
    },
    domain::{
        requests::transaction::{CreateTransactionRequest, FindAllTransactions},
        responses::{ApiResponse, PaginatedTransactions},
    },
    errors::{AppErrorHttp, ErrorResponse, ServiceError},
    model::session::Session,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

fn require_session(session: Option<Extension<Session>>) -> Result<Session, AppErrorHttp> {
    session
        .map(|Extension(session)| session)
        .ok_or(AppErrorHttp(ServiceError::InvalidUserId))
}

#[utoipa::path(
    get,
    path = "/v1/transactions",
    tag = "Transaction",
    security(("cookie_auth" = [])),
    params(FindAllTransactions),
    responses(
        (status = 200, description = "Caller's transactions, oldest first", body = ApiResponse<PaginatedTransactions>),
        (status = 400, description = "Missing user id in session", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_transactions(
    Extension(service): Extension<DynTransactionQueryService>,
    session: Option<Extension<Session>>,
    Query(params): Query<FindAllTransactions>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let session = require_session(session)?;
    let response = service
        .get_transactions(&session.user_id, params.limit(), params.page())
        .await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/v1/transactions/new",
    tag = "Transaction",
    security(("cookie_auth" = [])),
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = ApiResponse<()>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_transaction(
    Extension(service): Extension<DynTransactionCommandService>,
    session: Option<Extension<Session>>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateTransactionRequest>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let session = require_session(session)?;
    let response = service.create(&session.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/v1/transactions/download/{transaction_id}",
    tag = "Transaction",
    security(("cookie_auth" = [])),
    params(("transaction_id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "PDF receipt", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Unknown transaction", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Profile lookup or rendering failed", body = ErrorResponse)
    )
)]
pub async fn download_transaction(
    Extension(service): Extension<DynTransactionQueryService>,
    session: Option<Extension<Session>>,
    Path(transaction_id): Path<String>,
) -> Result<impl IntoResponse, AppErrorHttp> {
    let session = require_session(session)?;
    let pdf = service
        .download_transaction(&transaction_id, &session.cookie)
        .await?;

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={transaction_id}.pdf"),
            ),
        ],
        pdf,
    ))
}

pub fn transaction_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let version = &app_state.settings.route_version;

    let cache_state = CacheState {
        store: app_state.cache_store.clone(),
        ttl: app_state.settings.cache_ttl,
        require_auth: true,
    };

    let cached = OpenApiRouter::new()
        .route(&format!("/{version}/transactions"), get(get_transactions))
        .route_layer(middleware::from_fn_with_state(
            cache_state,
            cache::cache_response,
        ));

    OpenApiRouter::new()
        .route(
            &format!("/{version}/transactions/new"),
            post(create_transaction),
        )
        .route(
            &format!("/{version}/transactions/download/{{transaction_id}}"),
            get(download_transaction),
        )
        .merge(cached)
        .route_layer(middleware::from_fn(jwt::auth))
        .layer(Extension(app_state.di_container.transaction_query.clone()))
        .layer(Extension(app_state.di_container.transaction_command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
        .layer(Extension(AuthSettings {
            cookie_name: app_state.settings.cookie_name.clone(),
        }))
}
