use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

#[derive(Debug)]
pub struct AppErrorHttp(pub ServiceError);

impl AppErrorHttp {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ServiceError::Validation(_)
            | ServiceError::BadRequest(_)
            | ServiceError::InvalidUserId
            | ServiceError::TransactionNotFound(_) => StatusCode::BAD_REQUEST,

            ServiceError::Unauthorized | ServiceError::TokenExpired | ServiceError::TokenMismatch => {
                StatusCode::UNAUTHORIZED
            }

            ServiceError::Repo(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            ServiceError::Repo(RepositoryError::AlreadyExists(_)) => StatusCode::CONFLICT,

            ServiceError::Repo(_)
            | ServiceError::InvalidClaims
            | ServiceError::GetTransaction
            | ServiceError::NewTransaction
            | ServiceError::FetchUserProfile
            | ServiceError::DecodeUserProfile
            | ServiceError::InvalidUserProfile
            | ServiceError::Pdf
            | ServiceError::ReadBody(_)
            | ServiceError::Jwt(_)
            | ServiceError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            ServiceError::Validation(errors) => format!("Validation failed: {}", errors.join(", ")),
            ServiceError::Repo(RepositoryError::Sqlx(_)) => "Database error".to_string(),
            ServiceError::Jwt(_) => "Failed to sign token".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppErrorHttp {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            error!("🚨 HTTP Error {}: {} ({:?})", status, message, self.0);
        } else {
            warn!("⚠️ HTTP Warning {}: {}", status, message);
        }

        let body = Json(ErrorResponse::new(status.as_u16(), message));

        (status, body).into_response()
    }
}

impl From<ServiceError> for AppErrorHttp {
    fn from(error: ServiceError) -> Self {
        AppErrorHttp(error)
    }
}

impl From<RepositoryError> for AppErrorHttp {
    fn from(error: RepositoryError) -> Self {
        AppErrorHttp(ServiceError::Repo(error))
    }
}
