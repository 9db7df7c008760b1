use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::{
    cache::CacheStore,
    errors::{AppErrorHttp, ServiceError},
    model::{cache::CachedResponse, session::Session},
};
use std::{sync::Arc, time::Duration};
use tracing::{error, warn};

#[derive(Clone)]
pub struct CacheState {
    pub store: Arc<CacheStore>,
    pub ttl: Duration,
    /// Scope entries to the authenticated caller.
    pub require_auth: bool,
}

/// Replays a cached 2xx response for the request URI, or runs the handler and
/// caches its response on success.
pub async fn cache_response(State(state): State<CacheState>, req: Request, next: Next) -> Response {
    let key = match cache_key(&req, state.require_auth) {
        Ok(key) => key,
        Err(e) => return AppErrorHttp::from(e).into_response(),
    };

    if let Some(cached) = state.store.get_from_cache::<CachedResponse>(&key).await {
        return replay(cached);
    }

    let response = next.run(req).await;
    if !response.status().is_success() {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("❌ Failed to buffer response for {key}: {e}");
            return AppErrorHttp::from(ServiceError::InternalServerError(
                "failed to read response body".to_string(),
            ))
            .into_response();
        }
    };

    match std::str::from_utf8(&bytes) {
        Ok(text) => {
            let entry = CachedResponse {
                status: parts.status.as_u16(),
                response: text.to_string(),
                content_type: parts
                    .headers
                    .get(CONTENT_TYPE)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string(),
            };
            state.store.set_to_cache(&key, &entry, state.ttl).await;
        }
        Err(_) => warn!("⚠️ Not caching non-text response for {key}"),
    }

    Response::from_parts(parts, Body::from(bytes))
}

fn cache_key(req: &Request, require_auth: bool) -> Result<String, ServiceError> {
    let uri = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    if !require_auth {
        return Ok(uri);
    }

    let session = req
        .extensions()
        .get::<Session>()
        .ok_or(ServiceError::InvalidUserId)?;

    Ok(format!("{uri}/auth/{}", session.user_id))
}

fn replay(cached: CachedResponse) -> Response {
    let status = StatusCode::from_u16(cached.status).unwrap_or(StatusCode::OK);
    let mut response = (status, cached.response).into_response();

    match HeaderValue::from_str(&cached.content_type) {
        Ok(value) if !cached.content_type.is_empty() => {
            response.headers_mut().insert(CONTENT_TYPE, value);
        }
        _ => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }

    response
}
