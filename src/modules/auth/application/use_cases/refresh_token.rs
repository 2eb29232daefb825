use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::{AuthSession, UserDto};
use crate::modules::auth::application::errors::AuthError;
use crate::modules::auth::application::ports::outgoing::UserQuery;
use crate::modules::auth::application::services::TokenService;

#[async_trait]
pub trait IRefreshTokenUseCase: Send + Sync {
    async fn execute(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;
}

/// Exchanges a live refresh token for a new pair and rotates the stored
/// token. A token is live when its signature and expiry check out and it is
/// still the one stored for its user.
#[derive(Clone)]
pub struct RefreshTokenUseCase {
    query: Arc<dyn UserQuery>,
    tokens: TokenService,
}

impl RefreshTokenUseCase {
    pub fn new(query: Arc<dyn UserQuery>, tokens: TokenService) -> Self {
        Self { query, tokens }
    }
}

#[async_trait]
impl IRefreshTokenUseCase for RefreshTokenUseCase {
    async fn execute(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        if refresh_token.is_empty() {
            return Err(AuthError::unauthorized());
        }

        let claims = self
            .tokens
            .validate_refresh_token(refresh_token)
            .ok_or_else(AuthError::unauthorized)?;

        let stored = self
            .tokens
            .find_token(refresh_token)
            .await
            .map_err(AuthError::internal("Failed to look up refresh token"))?;
        if stored.is_none() {
            tracing::warn!(user_id = claims.id, "Refresh rejected: token not in storage");
            return Err(AuthError::unauthorized());
        }

        let user = self
            .query
            .find_by_id(claims.id)
            .await
            .map_err(AuthError::internal("Failed to load user for refresh"))?
            .ok_or_else(|| {
                tracing::warn!(user_id = claims.id, "Refresh rejected: user no longer exists");
                AuthError::unauthorized()
            })?;

        tracing::debug!(user_id = user.id, "Rotating refresh token");
        self.tokens.issue_session(UserDto::from(&user)).await
    }
}
