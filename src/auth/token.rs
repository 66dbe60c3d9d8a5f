//! Bearer-token issuing and verification.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

/// Tokens stay valid for one day after issue.
const TOKEN_TTL_HOURS: i64 = 24;

/// Errors raised while signing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token could not be signed.
    #[error("Failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
    /// Token signature or expiry check failed.
    #[error("Token rejected: {0}")]
    Verify(#[source] jsonwebtoken::errors::Error),
}

/// Claims carried inside a signed bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the authenticated account.
    pub email: String,
    /// Identifier of the authenticated account.
    pub user_id: String,
    /// Expiry as a Unix timestamp, checked during verification.
    pub exp: i64,
}

/// Sign a fresh HS256 token for the given account.
pub fn issue_token(secret: &str, email: &str, user_id: &str) -> Result<String, TokenError> {
    let claims = Claims {
        email: email.to_string(),
        user_id: user_id.to_string(),
        exp: (OffsetDateTime::now_utc() + Duration::hours(TOKEN_TTL_HOURS)).unix_timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Sign)
}

/// Verify a token's signature and expiry, returning its claims.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenError::Verify)
}
