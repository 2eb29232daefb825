use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::User;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored row could not be mapped to a domain user.
    #[error("Corrupt user record: {0}")]
    CorruptRecord(String),
}

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, UserQueryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError>;
    async fn find_by_activation_link(&self, link: &str) -> Result<Option<User>, UserQueryError>;
    /// Every user, ordered by id.
    async fn find_all(&self) -> Result<Vec<User>, UserQueryError>;
}
