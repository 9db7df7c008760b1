use thiserror::Error;

/// Why a bearer token was refused by the validator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is expired")]
    Expired,

    /// Not decodable as a JWT at all (segments, base64, JSON).
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// Decodable, but the signature, algorithm or required claims do not check out.
    #[error("Token rejected: {0}")]
    Rejected(String),
}
