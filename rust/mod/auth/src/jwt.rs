//! JWT service: issue and verify tokens.
//!
//! The server only verifies; issuing is used by the `token` command and
//! by tests.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use medsched_core::{Actor, Authenticator, ServiceError, new_id};
use tracing::debug;

use crate::claims::Claims;

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expire_secs: i64,
}

impl JwtService {
    /// Create a new JwtService with an HMAC secret.
    pub fn new(secret: &str, expire_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            expire_secs,
        }
    }

    /// Issue a signed token for an actor.
    pub fn issue(&self, actor: &Actor) -> Result<String, ServiceError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: actor.id.clone(),
            name: actor.name.clone(),
            user_type: actor.user_type,
            facility: actor.facility_id.clone(),
            sid: new_id(),
            iat: now,
            exp: now + self.expire_secs,
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Internal(format!("jwt encode: {}", e)))
    }

    /// Verify a token and extract claims.
    /// Fails if the token is invalid, expired, or tampered with.
    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| ServiceError::Unauthorized(format!("invalid token: {}", e)))
    }
}

impl Authenticator for JwtService {
    fn authenticate(&self, headers: &HeaderMap) -> Result<Actor, ServiceError> {
        let token = extract_bearer(headers)
            .ok_or_else(|| ServiceError::Unauthorized("missing authorization token".into()))?;
        let claims = self.verify(token)?;
        debug!(sub = %claims.sub, sid = %claims.sid, "token verified");
        Ok(claims.into())
    }
}

/// Extract the Bearer token from the Authorization header.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
