use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::auth::application::errors::AuthError;
use crate::modules::auth::application::ports::outgoing::{
    UserQuery, UserRepository, UserRepositoryError,
};

const INVALID_LINK: &str = "Invalid activation link";

#[async_trait]
pub trait IActivateUserUseCase: Send + Sync {
    async fn execute(&self, activation_link: &str) -> Result<(), AuthError>;
}

/// Consumes an activation link. Links are single-use: activation clears the
/// stored link, so presenting it again is treated like an unknown link.
#[derive(Clone)]
pub struct ActivateUserUseCase {
    query: Arc<dyn UserQuery>,
    repository: Arc<dyn UserRepository>,
}

impl ActivateUserUseCase {
    pub fn new(query: Arc<dyn UserQuery>, repository: Arc<dyn UserRepository>) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl IActivateUserUseCase for ActivateUserUseCase {
    async fn execute(&self, activation_link: &str) -> Result<(), AuthError> {
        if activation_link.is_empty() {
            return Err(AuthError::BadRequest(INVALID_LINK.to_string()));
        }

        let user = self
            .query
            .find_by_activation_link(activation_link)
            .await
            .map_err(AuthError::internal("Failed to look up activation link"))?
            .ok_or_else(|| {
                tracing::warn!("Activation attempted with unknown link");
                AuthError::BadRequest(INVALID_LINK.to_string())
            })?;

        self.repository
            .activate_user(user.id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => AuthError::BadRequest(INVALID_LINK.to_string()),
                other => AuthError::internal("Failed to activate user")(other),
            })?;

        tracing::info!(user_id = user.id, "User activated");
        Ok(())
    }
}
