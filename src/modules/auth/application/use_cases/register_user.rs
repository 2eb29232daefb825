use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::credentials::Credentials;
use crate::modules::auth::application::domain::entities::{AuthSession, NewUser, Role, UserDto};
use crate::modules::auth::application::errors::AuthError;
use crate::modules::auth::application::ports::outgoing::{
    PasswordHasher, UserQuery, UserRepository, UserRepositoryError,
};
use crate::modules::auth::application::services::TokenService;
use crate::modules::email::application::domain::ActivationMail;
use crate::modules::email::application::ports::incoming::ActivationDispatcher;

#[async_trait]
pub trait IRegisterUserUseCase: Send + Sync {
    async fn execute(&self, credentials: Credentials) -> Result<AuthSession, AuthError>;
}

#[derive(Clone)]
pub struct RegisterUserUseCase {
    query: Arc<dyn UserQuery>,
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenService,
    dispatcher: Arc<dyn ActivationDispatcher>,
    api_url: String,
}

impl RegisterUserUseCase {
    pub fn new(
        query: Arc<dyn UserQuery>,
        repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenService,
        dispatcher: Arc<dyn ActivationDispatcher>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            query,
            repository,
            hasher,
            tokens,
            dispatcher,
            api_url: api_url.into(),
        }
    }

    fn conflict(email: &str) -> AuthError {
        AuthError::Conflict(format!("User with email {email} already exists"))
    }
}

#[async_trait]
impl IRegisterUserUseCase for RegisterUserUseCase {
    async fn execute(&self, credentials: Credentials) -> Result<AuthSession, AuthError> {
        let email = credentials.email();

        let existing = self
            .query
            .find_by_email(email)
            .await
            .map_err(AuthError::internal("Failed to look up user by email"))?;
        if existing.is_some() {
            tracing::warn!(email, "Registration rejected: email already taken");
            return Err(Self::conflict(email));
        }

        let password_hash = self
            .hasher
            .hash_password(credentials.password())
            .await
            .map_err(AuthError::internal("Failed to hash password"))?;

        let activation_link = Uuid::new_v4().to_string();
        let user = self
            .repository
            .create_user(NewUser {
                email: email.to_string(),
                password_hash,
                role: Role::User,
                activation_link: activation_link.clone(),
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration of the same email.
                UserRepositoryError::UserAlreadyExists => Self::conflict(email),
                other => AuthError::internal("Failed to create user")(other),
            })?;

        tracing::info!(user_id = user.id, email = %user.email, "User registered");

        let mail = ActivationMail::for_link(&user.email, &self.api_url, &activation_link);
        if let Err(e) = self.dispatcher.enqueue(mail) {
            tracing::error!(
                user_id = user.id,
                error = %e,
                "Failed to queue activation mail; user kept"
            );
        }

        self.tokens.issue_session(UserDto::from(&user)).await
    }
}
