use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use shared::errors::{AppErrorHttp, ServiceError, format_validation_errors};
use validator::Validate;

/// JSON body extractor that runs `validator` rules before the handler sees the value.
pub struct SimpleValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppErrorHttp;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::BytesRejection(e) => ServiceError::ReadBody(e.body_text()),
                other => ServiceError::BadRequest(other.body_text()),
            })?;

        value
            .validate()
            .map_err(|e| ServiceError::Validation(format_validation_errors(&e)))?;

        Ok(Self(value))
    }
}
