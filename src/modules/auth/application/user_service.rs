use std::sync::Arc;

use super::domain::entities::{AuthSession, UserDto};
use super::errors::AuthError;
use super::ports::outgoing::{PasswordHasher, UserQuery, UserRepository};
use super::services::TokenService;
use super::use_cases::{
    ActivateUserUseCase, Credentials, IActivateUserUseCase, IListUsersUseCase, ILoginUserUseCase,
    ILogoutUserUseCase, IRefreshTokenUseCase, IRegisterUserUseCase, ListUsersUseCase,
    LoginUserUseCase, LogoutUserUseCase, RefreshTokenUseCase, RegisterUserUseCase,
};
use crate::modules::email::application::ports::incoming::ActivationDispatcher;

/// Collaborators needed to assemble a [`UserService`].
#[derive(Clone)]
pub struct UserServiceDeps {
    pub user_query: Arc<dyn UserQuery>,
    pub user_repository: Arc<dyn UserRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_service: TokenService,
    pub activation_dispatcher: Arc<dyn ActivationDispatcher>,
    /// Public base URL used to build activation links.
    pub api_url: String,
}

/// Account lifecycle entry point: one use case per operation.
#[derive(Clone)]
pub struct UserService {
    pub register_user: Arc<dyn IRegisterUserUseCase>,
    pub activate_user: Arc<dyn IActivateUserUseCase>,
    pub login_user: Arc<dyn ILoginUserUseCase>,
    pub logout_user: Arc<dyn ILogoutUserUseCase>,
    pub refresh_token: Arc<dyn IRefreshTokenUseCase>,
    pub list_users: Arc<dyn IListUsersUseCase>,
}

impl UserService {
    pub fn new(deps: UserServiceDeps) -> Self {
        let UserServiceDeps {
            user_query,
            user_repository,
            password_hasher,
            token_service,
            activation_dispatcher,
            api_url,
        } = deps;

        Self {
            register_user: Arc::new(RegisterUserUseCase::new(
                user_query.clone(),
                user_repository.clone(),
                password_hasher.clone(),
                token_service.clone(),
                activation_dispatcher,
                api_url,
            )),
            activate_user: Arc::new(ActivateUserUseCase::new(
                user_query.clone(),
                user_repository,
            )),
            login_user: Arc::new(LoginUserUseCase::new(
                user_query.clone(),
                password_hasher,
                token_service.clone(),
            )),
            logout_user: Arc::new(LogoutUserUseCase::new(token_service.clone())),
            refresh_token: Arc::new(RefreshTokenUseCase::new(
                user_query.clone(),
                token_service,
            )),
            list_users: Arc::new(ListUsersUseCase::new(user_query)),
        }
    }

    pub async fn registration(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let credentials = Credentials::new(email, password)?;
        self.register_user.execute(credentials).await
    }

    pub async fn activate(&self, activation_link: &str) -> Result<(), AuthError> {
        self.activate_user.execute(activation_link).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let credentials = Credentials::for_login(email, password);
        self.login_user.execute(credentials).await
    }

    pub async fn logout(&self, refresh_token: &str) -> Result<u64, AuthError> {
        self.logout_user.execute(refresh_token).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        self.refresh_token.execute(refresh_token).await
    }

    pub async fn get_all_users(&self) -> Result<Vec<UserDto>, AuthError> {
        self.list_users.execute().await
    }
}
