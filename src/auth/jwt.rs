//! JWT token handling

use crate::auth::models::Role;
use crate::error::{Error, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims carried by the `access_token` cookie
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Role tag, parsed into [`Role`] by the resolver
    pub role: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject with the given lifetime
    pub fn new(subject_id: &str, role: Role, ttl_secs: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: subject_id.to_string(),
            role: role.as_str().to_string(),
            iat: now,
            exp: now + ttl_secs,
        }
    }

    /// Check if the token is past its expiration
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() > self.exp
    }
}

/// Sign a token with the given secret
///
/// Production tokens are issued by the auth service; this exists for the
/// `edgegate token` development command and for tests.
pub fn create_token(secret: &str, subject_id: &str, role: Role, ttl_secs: i64) -> Result<String> {
    let claims = Claims::new(subject_id, role, ttl_secs);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(Error::Token)
}

/// Verify a token's signature and expiry against a prepared key
pub(crate) fn verify_token(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
) -> Result<TokenData<Claims>> {
    decode::<Claims>(token, key, validation).map_err(Error::Token)
}
