//! Login token issuance and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain_auth::AuthUser;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Verified phone number
    pub phone: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Creates a signed HS256 token for `user`
pub fn create_token(user: &AuthUser, secret: &str, expiration_secs: u64) -> Result<String, TokenError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = TokenClaims {
        sub: user.id.as_uuid().to_string(),
        phone: user.phone_number.clone(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Validates a token and returns its claims
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, TokenError> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        _ => TokenError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Token from an `Authorization: Bearer ...` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
}
