use std::sync::Arc;

use actix_web::web;

use crate::modules::auth::application::errors::AuthError;
use crate::modules::auth::application::services::TokenService;
use crate::modules::auth::application::use_cases::{
    IActivateUserUseCase, IListUsersUseCase, ILoginUserUseCase, ILogoutUserUseCase,
    IRefreshTokenUseCase, IRegisterUserUseCase,
};
use crate::modules::auth::application::UserService;
use crate::tests::support::memory::InMemoryTokenRepository;
use crate::tests::support::stubs::StubFailingUseCase;
use crate::tests::support::test_token_service;
use crate::AppState;

/// Builds an [`AppState`] for route tests. Every use case not replaced
/// through a `with_*` method answers with an internal error.
pub struct TestAppStateBuilder {
    user_service: UserService,
    token_service: TokenService,
    client_url: Option<String>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        let stub = Arc::new(StubFailingUseCase::new(AuthError::Internal(
            "use case not configured for this test".to_string(),
        )));

        Self {
            user_service: UserService {
                register_user: stub.clone(),
                activate_user: stub.clone(),
                login_user: stub.clone(),
                logout_user: stub.clone(),
                refresh_token: stub.clone(),
                list_users: stub,
            },
            token_service: test_token_service(Arc::new(InMemoryTokenRepository::default())),
            client_url: None,
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_user_service(mut self, service: UserService) -> Self {
        self.user_service = service;
        self
    }

    pub fn with_token_service(mut self, service: TokenService) -> Self {
        self.token_service = service;
        self
    }

    pub fn with_client_url(mut self, url: &str) -> Self {
        self.client_url = Some(url.to_string());
        self
    }

    pub fn with_register_user(mut self, uc: impl IRegisterUserUseCase + 'static) -> Self {
        self.user_service.register_user = Arc::new(uc);
        self
    }

    pub fn with_activate_user(mut self, uc: impl IActivateUserUseCase + 'static) -> Self {
        self.user_service.activate_user = Arc::new(uc);
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + 'static) -> Self {
        self.user_service.login_user = Arc::new(uc);
        self
    }

    pub fn with_logout_user(mut self, uc: impl ILogoutUserUseCase + 'static) -> Self {
        self.user_service.logout_user = Arc::new(uc);
        self
    }

    pub fn with_refresh_token(mut self, uc: impl IRefreshTokenUseCase + 'static) -> Self {
        self.user_service.refresh_token = Arc::new(uc);
        self
    }

    pub fn with_list_users(mut self, uc: impl IListUsersUseCase + 'static) -> Self {
        self.user_service.list_users = Arc::new(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            user_service: self.user_service,
            token_service: self.token_service,
            client_url: self.client_url,
        })
    }
}
