use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{Role, UserDto};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token encoding error: {0}")]
    EncodingError(String),
}

/// Signed claim set: the user projection plus registered JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: i32,
    pub email: String,
    pub role: Role,
    pub iss: String,
    /// Unique per issued token, so a rotated token never equals its successor.
    pub jti: Uuid,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(user: &UserDto, issuer: &str, issued_at: DateTime<Utc>, ttl_seconds: i64) -> Self {
        let iat = issued_at.timestamp();
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            iss: issuer.to_string(),
            jti: Uuid::new_v4(),
            iat,
            nbf: iat,
            exp: iat + ttl_seconds,
        }
    }

    pub fn user(&self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Signs and verifies access and refresh tokens. The two kinds use distinct
/// secrets, so one can never be accepted as the other.
pub trait TokenProvider: Send + Sync {
    fn generate_access_token(&self, user: &UserDto) -> Result<String, TokenError>;
    fn generate_refresh_token(&self, user: &UserDto) -> Result<String, TokenError>;
    fn verify_access_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
    fn verify_refresh_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
