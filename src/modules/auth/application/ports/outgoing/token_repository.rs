use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::Token;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Storage for the single live refresh token of each user.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Insert the token for `user_id`, or overwrite the existing one.
    /// Never leaves more than one row per user.
    async fn upsert(&self, user_id: i32, refresh_token: &str)
        -> Result<Token, TokenRepositoryError>;

    /// Returns the number of rows removed; zero is not an error.
    async fn delete_by_refresh_token(&self, refresh_token: &str)
        -> Result<u64, TokenRepositoryError>;

    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<Token>, TokenRepositoryError>;
}
