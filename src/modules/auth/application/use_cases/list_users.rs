use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::UserDto;
use crate::modules::auth::application::errors::AuthError;
use crate::modules::auth::application::ports::outgoing::UserQuery;

#[async_trait]
pub trait IListUsersUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<UserDto>, AuthError>;
}

#[derive(Clone)]
pub struct ListUsersUseCase {
    query: Arc<dyn UserQuery>,
}

impl ListUsersUseCase {
    pub fn new(query: Arc<dyn UserQuery>) -> Self {
        Self { query }
    }
}

#[async_trait]
impl IListUsersUseCase for ListUsersUseCase {
    async fn execute(&self) -> Result<Vec<UserDto>, AuthError> {
        let users = self
            .query
            .find_all()
            .await
            .map_err(AuthError::internal("Failed to list users"))?;

        Ok(users.iter().map(UserDto::from).collect())
    }
}
