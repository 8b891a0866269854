//! Session resolution
//!
//! Turns a raw cookie value into a verified [`Identity`], or nothing. Every
//! verification failure - absent token, malformed token, bad signature,
//! expired token, unknown role claim - collapses to `None`. Anonymous
//! visitors hit this path on every request, so it must stay a cheap, silent
//! branch; callers never learn why verification failed.

use crate::auth::jwt::{self, Claims};
use crate::auth::models::Identity;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

/// Verifies session tokens against the process-wide signing secret
///
/// Built once at startup; the decoding key and validation settings are
/// immutable afterwards, so the resolver is freely shareable across requests.
pub struct SessionResolver {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionResolver {
    /// Create a resolver for the given signing secret
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Resolve a token into an identity
    ///
    /// Returns `None` for an absent token without attempting verification,
    /// and for any token that fails signature, expiry or role-claim checks.
    pub fn resolve(&self, token: Option<&str>) -> Option<Identity> {
        let token = token?;
        let claims = self.verify(token)?;
        let role = claims.role.parse().ok()?;
        Some(Identity {
            subject_id: claims.sub,
            role,
        })
    }

    fn verify(&self, token: &str) -> Option<Claims> {
        jwt::verify_token(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .ok()
    }
}
