use async_trait::async_trait;

use crate::modules::auth::application::errors::AuthError;
use crate::modules::auth::application::services::TokenService;

#[async_trait]
pub trait ILogoutUserUseCase: Send + Sync {
    /// Returns the number of stored tokens removed (0 or 1).
    async fn execute(&self, refresh_token: &str) -> Result<u64, AuthError>;
}

#[derive(Clone)]
pub struct LogoutUserUseCase {
    tokens: TokenService,
}

impl LogoutUserUseCase {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl ILogoutUserUseCase for LogoutUserUseCase {
    async fn execute(&self, refresh_token: &str) -> Result<u64, AuthError> {
        if refresh_token.is_empty() {
            return Ok(0);
        }

        let deleted = self
            .tokens
            .remove_token(refresh_token)
            .await
            .map_err(AuthError::internal("Failed to remove refresh token"))?;

        tracing::info!(deleted, "Logout processed");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::memory::InMemoryTokenRepository;
    use crate::tests::support::test_token_service;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_logout_removes_stored_token() {
        let repo = Arc::new(InMemoryTokenRepository::default());
        let tokens = test_token_service(repo.clone());
        tokens.save_token(1, "refresh-abc").await.unwrap();

        let deleted = LogoutUserUseCase::new(tokens).execute("refresh-abc").await.unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn test_logout_of_absent_or_empty_token_is_zero() {
        let repo = Arc::new(InMemoryTokenRepository::default());
        let use_case = LogoutUserUseCase::new(test_token_service(repo));

        assert_eq!(use_case.execute("never-issued").await.unwrap(), 0);
        assert_eq!(use_case.execute("").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_internal() {
        let repo = Arc::new(InMemoryTokenRepository::failing());
        let use_case = LogoutUserUseCase::new(test_token_service(repo));

        assert!(matches!(
            use_case.execute("refresh-abc").await,
            Err(AuthError::Internal(_))
        ));
    }
}
