use std::sync::Arc;

use async_trait::async_trait;

use super::credentials::Credentials;
use crate::modules::auth::application::domain::entities::{AuthSession, UserDto};
use crate::modules::auth::application::errors::AuthError;
use crate::modules::auth::application::ports::outgoing::{PasswordHasher, UserQuery};
use crate::modules::auth::application::services::TokenService;

#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, credentials: Credentials) -> Result<AuthSession, AuthError>;
}

#[derive(Clone)]
pub struct LoginUserUseCase {
    query: Arc<dyn UserQuery>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenService,
}

impl LoginUserUseCase {
    pub fn new(query: Arc<dyn UserQuery>, hasher: Arc<dyn PasswordHasher>, tokens: TokenService) -> Self {
        Self {
            query,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl ILoginUserUseCase for LoginUserUseCase {
    async fn execute(&self, credentials: Credentials) -> Result<AuthSession, AuthError> {
        let email = credentials.email();

        let user = self
            .query
            .find_by_email(email)
            .await
            .map_err(AuthError::internal("Failed to look up user by email"))?
            .ok_or_else(|| {
                tracing::warn!(email, "Login rejected: unknown email");
                AuthError::NotFound(format!("User with email {email} not found"))
            })?;

        let is_valid = self
            .hasher
            .verify_password(credentials.password(), &user.password_hash)
            .await
            .map_err(AuthError::internal("Failed to verify password"))?;

        if !is_valid {
            tracing::warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(AuthError::Unauthorized("Invalid password".to_string()));
        }

        tracing::info!(user_id = user.id, "User logged in");
        self.tokens.issue_session(UserDto::from(&user)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::Role;
    use crate::tests::support::memory::{InMemoryTokenRepository, InMemoryUserStore};
    use crate::tests::support::stubs::PlainHasher;
    use crate::tests::support::{test_jwt_service, test_token_service};
    use crate::modules::auth::application::ports::outgoing::TokenProvider;

    async fn setup() -> (Arc<InMemoryUserStore>, Arc<InMemoryTokenRepository>, LoginUserUseCase) {
        let users = Arc::new(InMemoryUserStore::default());
        let hash = PlainHasher.hash_password("correct-horse").await.unwrap();
        users.insert("buyer@example.com", &hash, Role::Admin).await;

        let tokens = Arc::new(InMemoryTokenRepository::default());
        let use_case = LoginUserUseCase::new(
            users.clone(),
            Arc::new(PlainHasher),
            test_token_service(tokens.clone()),
        );
        (users, tokens, use_case)
    }

    #[tokio::test]
    async fn test_login_issues_tokens_carrying_user_payload() {
        let (_, tokens, use_case) = setup().await;

        let session = use_case
            .execute(Credentials::new("Buyer@Example.com", "correct-horse").unwrap())
            .await
            .unwrap();

        let claims = test_jwt_service()
            .verify_access_token(&session.access_token)
            .unwrap();
        assert_eq!(claims.id, session.user.id);
        assert_eq!(claims.email, "buyer@example.com");
        assert_eq!(claims.role, Role::Admin);

        let stored = tokens.find_by_user(session.user.id).await.unwrap();
        assert_eq!(stored.refresh_token, session.refresh_token);
    }

    #[tokio::test]
    async fn test_second_login_replaces_refresh_token() {
        let (_, tokens, use_case) = setup().await;
        let creds = Credentials::new("buyer@example.com", "correct-horse").unwrap();

        let first = use_case.execute(creds.clone()).await.unwrap();
        let second = use_case.execute(creds).await.unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
        assert_eq!(tokens.count_for_user(second.user.id).await, 1);
        assert_eq!(
            tokens.find_by_user(second.user.id).await.unwrap().refresh_token,
            second.refresh_token
        );
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let (_, tokens, use_case) = setup().await;

        let result = use_case
            .execute(Credentials::new("buyer@example.com", "wrong").unwrap())
            .await;

        assert!(matches!(result, Err(AuthError::Unauthorized(_))));
        assert_eq!(tokens.len().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let (_, _, use_case) = setup().await;

        let result = use_case
            .execute(Credentials::new("nobody@example.com", "correct-horse").unwrap())
            .await;

        assert!(matches!(result, Err(AuthError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_malformed_email_is_not_found() {
        let (_, _, use_case) = setup().await;

        let result = use_case
            .execute(Credentials::for_login("not-an-email", "correct-horse"))
            .await;

        assert!(matches!(result, Err(AuthError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_password_is_unauthorized() {
        let (_, tokens, use_case) = setup().await;

        let result = use_case
            .execute(Credentials::for_login("buyer@example.com", ""))
            .await;

        assert!(matches!(result, Err(AuthError::Unauthorized(_))));
        assert_eq!(tokens.len().await, 0);
    }

    #[tokio::test]
    async fn test_unactivated_user_can_log_in() {
        let (users, _, use_case) = setup().await;
        let user = users.find_by_email("buyer@example.com").await.unwrap().unwrap();
        assert!(!user.is_activated);

        let result = use_case
            .execute(Credentials::new("buyer@example.com", "correct-horse").unwrap())
            .await;

        assert!(result.is_ok());
    }
}
