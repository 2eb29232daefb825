use std::sync::Mutex;

use async_trait::async_trait;

use crate::modules::auth::application::domain::entities::{AuthSession, UserDto};
use crate::modules::auth::application::errors::AuthError;
use crate::modules::auth::application::ports::outgoing::{HashError, PasswordHasher};
use crate::modules::auth::application::use_cases::{
    Credentials, IActivateUserUseCase, IListUsersUseCase, ILoginUserUseCase, ILogoutUserUseCase,
    IRefreshTokenUseCase, IRegisterUserUseCase,
};
use crate::modules::email::application::domain::ActivationMail;
use crate::modules::email::application::ports::incoming::{ActivationDispatcher, DispatchError};

const PLAIN_PREFIX: &str = "plain$";

/// Reversible "hash" for fast unit tests.
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("{PLAIN_PREFIX}{password}"))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        let stored = hash.strip_prefix(PLAIN_PREFIX).ok_or(HashError::VerifyFailed)?;
        Ok(stored == password)
    }
}

pub struct FailingHasher;

#[async_trait]
impl PasswordHasher for FailingHasher {
    async fn hash_password(&self, _password: &str) -> Result<String, HashError> {
        Err(HashError::HashFailed)
    }

    async fn verify_password(&self, _password: &str, _hash: &str) -> Result<bool, HashError> {
        Err(HashError::VerifyFailed)
    }
}

/// Captures queued activation mail instead of delivering it.
#[derive(Default)]
pub struct RecordingDispatcher {
    mails: Mutex<Vec<ActivationMail>>,
    reject: bool,
}

impl RecordingDispatcher {
    pub fn rejecting() -> Self {
        Self {
            mails: Mutex::default(),
            reject: true,
        }
    }

    pub fn sent(&self) -> Vec<ActivationMail> {
        self.mails.lock().unwrap().clone()
    }
}

impl ActivationDispatcher for RecordingDispatcher {
    fn enqueue(&self, mail: ActivationMail) -> Result<(), DispatchError> {
        if self.reject {
            return Err(DispatchError::QueueFull);
        }
        self.mails.lock().unwrap().push(mail);
        Ok(())
    }
}

/// Answers every user operation with the same error.
#[derive(Clone)]
pub struct StubFailingUseCase {
    pub error: AuthError,
}

impl StubFailingUseCase {
    pub fn new(error: AuthError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl IRegisterUserUseCase for StubFailingUseCase {
    async fn execute(&self, _credentials: Credentials) -> Result<AuthSession, AuthError> {
        Err(self.error.clone())
    }
}

#[async_trait]
impl IActivateUserUseCase for StubFailingUseCase {
    async fn execute(&self, _activation_link: &str) -> Result<(), AuthError> {
        Err(self.error.clone())
    }
}

#[async_trait]
impl ILoginUserUseCase for StubFailingUseCase {
    async fn execute(&self, _credentials: Credentials) -> Result<AuthSession, AuthError> {
        Err(self.error.clone())
    }
}

#[async_trait]
impl ILogoutUserUseCase for StubFailingUseCase {
    async fn execute(&self, _refresh_token: &str) -> Result<u64, AuthError> {
        Err(self.error.clone())
    }
}

#[async_trait]
impl IRefreshTokenUseCase for StubFailingUseCase {
    async fn execute(&self, _refresh_token: &str) -> Result<AuthSession, AuthError> {
        Err(self.error.clone())
    }
}

#[async_trait]
impl IListUsersUseCase for StubFailingUseCase {
    async fn execute(&self) -> Result<Vec<UserDto>, AuthError> {
        Err(self.error.clone())
    }
}
