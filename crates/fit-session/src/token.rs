//! Access-token cookie verification

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Outcome of resolving the auth cookie family for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    Authenticated(String),
    /// A token cookie was present but no longer verifies (expired or garbage).
    Stale,
    Absent,
}

/// Verifies the `sb-access-token` cookie issued by the auth backend.
pub struct TokenVerifier {
    secret: String,
}

impl TokenVerifier {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn status(&self, token: Option<&str>) -> AuthStatus {
        match token {
            None => AuthStatus::Absent,
            Some(t) => match self.verify(t) {
                Ok(claims) => AuthStatus::Authenticated(claims.sub),
                Err(_) => AuthStatus::Stale,
            },
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| TokenError::ValidationError(e.to_string()))
    }

    /// Mint a token for the given subject. The auth backend owns issuance in
    /// production; this exists for local tooling and tests.
    pub fn issue(&self, sub: &str, ttl_seconds: i64) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::CreationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_token_authenticates() {
        let verifier = TokenVerifier::new("secret".into());
        let token = verifier.issue("user-1", 3600).unwrap();
        assert_eq!(
            verifier.status(Some(&token)),
            AuthStatus::Authenticated("user-1".into())
        );
    }

    #[test]
    fn test_expired_token_is_stale() {
        let verifier = TokenVerifier::new("secret".into());
        // Well past the default validation leeway.
        let token = verifier.issue("user-1", -3600).unwrap();
        assert_eq!(verifier.status(Some(&token)), AuthStatus::Stale);
    }

    #[test]
    fn test_garbage_token_is_stale() {
        let verifier = TokenVerifier::new("secret".into());
        assert_eq!(verifier.status(Some("not-a-jwt")), AuthStatus::Stale);
    }

    #[test]
    fn test_missing_token_is_absent() {
        let verifier = TokenVerifier::new("secret".into());
        assert_eq!(verifier.status(None), AuthStatus::Absent);
    }
}
