use std::fmt;
use std::sync::Arc;

use crate::modules::auth::application::domain::entities::{
    AuthSession, Token, TokenPair, UserDto,
};
use crate::modules::auth::application::errors::AuthError;
use crate::modules::auth::application::ports::outgoing::{
    TokenClaims, TokenError, TokenProvider, TokenRepository, TokenRepositoryError,
};

/// Issues, validates and persists token pairs.
///
/// Validation never fails loudly: a bad signature, an expired token or a
/// malformed string all come back as `None`, leaving the caller to decide
/// how fatal that is.
#[derive(Clone)]
pub struct TokenService {
    provider: Arc<dyn TokenProvider>,
    repository: Arc<dyn TokenRepository>,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("provider", &"<dyn TokenProvider>")
            .field("repository", &"<dyn TokenRepository>")
            .finish()
    }
}

impl TokenService {
    pub fn new(provider: Arc<dyn TokenProvider>, repository: Arc<dyn TokenRepository>) -> Self {
        Self {
            provider,
            repository,
        }
    }

    pub fn generate_tokens(&self, user: &UserDto) -> Result<TokenPair, TokenError> {
        let access_token = self.provider.generate_access_token(user)?;
        let refresh_token = self.provider.generate_refresh_token(user)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    pub fn validate_access_token(&self, token: &str) -> Option<TokenClaims> {
        match self.provider.verify_access_token(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(error = %e, "Access token rejected");
                None
            }
        }
    }

    pub fn validate_refresh_token(&self, token: &str) -> Option<TokenClaims> {
        match self.provider.verify_refresh_token(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(error = %e, "Refresh token rejected");
                None
            }
        }
    }

    pub async fn save_token(
        &self,
        user_id: i32,
        refresh_token: &str,
    ) -> Result<Token, TokenRepositoryError> {
        self.repository.upsert(user_id, refresh_token).await
    }

    pub async fn remove_token(&self, refresh_token: &str) -> Result<u64, TokenRepositoryError> {
        self.repository.delete_by_refresh_token(refresh_token).await
    }

    pub async fn find_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<Token>, TokenRepositoryError> {
        self.repository.find_by_refresh_token(refresh_token).await
    }

    /// Generate a pair for `user` and persist its refresh token, replacing
    /// whatever token the user held before.
    pub async fn issue_session(&self, user: UserDto) -> Result<AuthSession, AuthError> {
        let tokens = self.generate_tokens(&user).map_err(|e| {
            tracing::error!(user_id = user.id, error = %e, "Token generation failed");
            AuthError::Internal(e.to_string())
        })?;

        self.save_token(user.id, &tokens.refresh_token)
            .await
            .map_err(|e| {
                tracing::error!(user_id = user.id, error = %e, "Failed to persist refresh token");
                AuthError::Internal(e.to_string())
            })?;

        Ok(AuthSession::new(tokens, user))
    }
}
