use crate::{
    abstract_trait::jwt::JwtServiceTrait,
    errors::{ServiceError, TokenError},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: String,
    iat: i64,
    exp: i64,
}

/// HMAC-signed tokens carrying a `user_id` claim.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig").finish_non_exhaustive()
    }
}

impl JwtConfig {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, user_id: &str, validity: Duration) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    fn verify_token(&self, token: &str) -> Result<Value, TokenError> {
        decode::<Value>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => TokenError::Malformed(err.to_string()),
                _ => TokenError::Rejected(err.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips_user_id() {
        let jwt = JwtConfig::new("secret");
        let token = jwt.generate_token("user-42", Duration::minutes(5)).unwrap();

        let claims = jwt.verify_token(&token).unwrap();
        assert_eq!(claims["user_id"], "user-42");
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let jwt = JwtConfig::new("secret");
        let token = jwt.generate_token("user-42", Duration::hours(-2)).unwrap();

        assert_eq!(jwt.verify_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let issuer = JwtConfig::new("other-secret");
        let token = issuer.generate_token("user-42", Duration::minutes(5)).unwrap();

        let result = JwtConfig::new("secret").verify_token(&token);
        assert!(matches!(result, Err(TokenError::Rejected(_))));
    }

    #[test]
    fn garbage_is_malformed() {
        let result = JwtConfig::new("secret").verify_token("not-a-jwt");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }
}
