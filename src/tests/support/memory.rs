use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{NewUser, Role, Token, User};
use crate::modules::auth::application::ports::outgoing::{
    TokenRepository, TokenRepositoryError, UserQuery, UserQueryError, UserRepository,
    UserRepositoryError,
};

/// `users` table stand-in. Implements both the query and the repository port.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    fail: bool,
}

impl InMemoryUserStore {
    /// Every call fails with a database error.
    pub fn failing() -> Self {
        Self {
            users: Mutex::default(),
            fail: true,
        }
    }

    pub async fn insert(&self, email: &str, password_hash: &str, role: Role) -> User {
        self.create_user(NewUser {
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            activation_link: Uuid::new_v4().to_string(),
        })
        .await
        .expect("insert test user")
    }

    pub async fn get(&self, id: i32) -> Option<User> {
        self.users.lock().await.iter().find(|u| u.id == id).cloned()
    }

    pub async fn remove(&self, id: i32) {
        self.users.lock().await.retain(|u| u.id != id);
    }

    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    fn query_error(&self) -> Result<(), UserQueryError> {
        if self.fail {
            return Err(UserQueryError::DatabaseError("store unavailable".to_string()));
        }
        Ok(())
    }

    fn repository_error(&self) -> Result<(), UserRepositoryError> {
        if self.fail {
            return Err(UserRepositoryError::DatabaseError("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserQuery for InMemoryUserStore {
    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, UserQueryError> {
        self.query_error()?;
        Ok(self.get(user_id).await)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        self.query_error()?;
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_activation_link(&self, link: &str) -> Result<Option<User>, UserQueryError> {
        self.query_error()?;
        let users = self.users.lock().await;
        Ok(users
            .iter()
            .find(|u| u.activation_link.as_deref() == Some(link))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserQueryError> {
        self.query_error()?;
        let mut users = self.users.lock().await.clone();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        self.repository_error()?;
        let mut users = self.users.lock().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserRepositoryError::UserAlreadyExists);
        }

        let now = Utc::now();
        let created = User {
            id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            is_activated: false,
            activation_link: Some(user.activation_link),
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn activate_user(&self, user_id: i32) -> Result<User, UserRepositoryError> {
        self.repository_error()?;
        let mut users = self.users.lock().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(UserRepositoryError::UserNotFound)?;

        user.is_activated = true;
        user.activation_link = None;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

/// `user_tokens` stand-in keyed by user id, so a second save for the same
/// user overwrites the first just like the unique constraint does.
#[derive(Default)]
pub struct InMemoryTokenRepository {
    tokens: Mutex<HashMap<i32, Token>>,
    next_id: AtomicI32,
    fail: bool,
}

impl InMemoryTokenRepository {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn count_for_user(&self, user_id: i32) -> usize {
        self.tokens
            .lock()
            .await
            .values()
            .filter(|t| t.user_id == user_id)
            .count()
    }

    pub async fn find_by_user(&self, user_id: i32) -> Option<Token> {
        self.tokens.lock().await.get(&user_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.tokens.lock().await.len()
    }

    fn check(&self) -> Result<(), TokenRepositoryError> {
        if self.fail {
            return Err(TokenRepositoryError::DatabaseError("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn upsert(&self, user_id: i32, refresh_token: &str) -> Result<Token, TokenRepositoryError> {
        self.check()?;
        let mut tokens = self.tokens.lock().await;
        let id = match tokens.get(&user_id) {
            Some(existing) => existing.id,
            None => self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
        };

        let token = Token {
            id,
            user_id,
            refresh_token: refresh_token.to_string(),
            updated_at: Utc::now(),
        };
        tokens.insert(user_id, token.clone());
        Ok(token)
    }

    async fn delete_by_refresh_token(&self, refresh_token: &str) -> Result<u64, TokenRepositoryError> {
        self.check()?;
        let mut tokens = self.tokens.lock().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.refresh_token != refresh_token);
        Ok((before - tokens.len()) as u64)
    }

    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<Token>, TokenRepositoryError> {
        self.check()?;
        let tokens = self.tokens.lock().await;
        Ok(tokens
            .values()
            .find(|t| t.refresh_token == refresh_token)
            .cloned())
    }
}
