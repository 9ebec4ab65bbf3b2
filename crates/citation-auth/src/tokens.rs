//! Signed bearer tokens
//!
//! Tokens are HS256 JWTs binding an identity id in `sub`, valid for 30 days.
//! `resolve` verifies signature and expiry and returns the bound id; every
//! failure mode maps to the same `InvalidToken` error.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, Result};

/// Token validity window
pub const TOKEN_TTL_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Bound identity id
    sub: Uuid,
    iat: i64,
    exp: i64,
}

/// Issues and inspects bearer tokens with a shared signing secret
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::days(TOKEN_TTL_DAYS))
    }

    /// Construct with an explicit validity window. Mainly for tests that
    /// need already-expired tokens.
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            ttl,
        }
    }

    /// Issue a token binding the given identity id
    pub fn issue(&self, identity_id: Uuid) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the bound identity id.
    ///
    /// Malformed, expired and forged tokens are indistinguishable to the
    /// caller: all return `InvalidToken`.
    pub fn resolve(&self, token: &str) -> Result<Uuid> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|_| AuthError::InvalidToken)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .field("secret", &"[redacted]")
            .finish()
    }
}
