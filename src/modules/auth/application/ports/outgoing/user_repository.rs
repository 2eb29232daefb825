use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::{NewUser, User};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `UserAlreadyExists` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Marks the user activated and clears the activation link. Never
    /// flips the flag back to false.
    async fn activate_user(&self, user_id: i32) -> Result<User, UserRepositoryError>;
}
