use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use serde_json::Value;
use shared::{
    abstract_trait::jwt::{DynJwtService, JwtServiceTrait},
    errors::{AppErrorHttp, ServiceError, TokenError},
    model::session::Session,
};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub cookie_name: String,
}

/// Verifies the session cookie and attaches the caller's [`Session`] to the request.
pub async fn auth(
    Extension(jwt): Extension<DynJwtService>,
    Extension(settings): Extension<AuthSettings>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppErrorHttp> {
    let token = jar
        .get(&settings.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or(ServiceError::Unauthorized)?;

    let session = authenticate(jwt.as_ref(), &token)?;
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

pub fn authenticate(
    jwt: &(dyn JwtServiceTrait + Send + Sync),
    token: &str,
) -> Result<Session, ServiceError> {
    let claims = jwt.verify_token(token).map_err(|e| {
        warn!("🔒 Rejected session token: {e}");
        match e {
            TokenError::Expired => ServiceError::TokenExpired,
            TokenError::Malformed(_) => ServiceError::Unauthorized,
            TokenError::Rejected(_) => ServiceError::TokenMismatch,
        }
    })?;

    let Value::Object(claims) = claims else {
        return Err(ServiceError::InvalidClaims);
    };

    let user_id = claims
        .get("user_id")
        .and_then(Value::as_str)
        .ok_or(ServiceError::InvalidUserId)?;

    Ok(Session {
        user_id: user_id.to_string(),
        cookie: token.to_string(),
    })
}
