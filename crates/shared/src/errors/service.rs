use crate::errors::repository::RepositoryError;
use jsonwebtoken::errors::Error as JwtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token does not match")]
    TokenMismatch,

    #[error("Failed to read token claims")]
    InvalidClaims,

    #[error("Failed to read user id from token")]
    InvalidUserId,

    #[error("Failed to get transaction")]
    GetTransaction,

    #[error("Failed to get transaction: no record for id {0}")]
    TransactionNotFound(String),

    #[error("Failed to record new transaction")]
    NewTransaction,

    #[error("Failed fetching data from user service")]
    FetchUserProfile,

    #[error("Failed to decode user service response")]
    DecodeUserProfile,

    #[error("Unexpected user service response")]
    InvalidUserProfile,

    #[error("Failed to generate pdf")]
    Pdf,

    #[error("Failed to read request body: {0}")]
    ReadBody(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}
