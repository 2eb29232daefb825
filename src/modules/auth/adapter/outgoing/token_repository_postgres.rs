use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;

use crate::modules::auth::application::domain::entities::Token;
use crate::modules::auth::application::ports::outgoing::{TokenRepository, TokenRepositoryError};

use super::sea_orm_entity::user_tokens::{
    ActiveModel as TokenActiveModel, Column as TokenColumn, Entity as TokenEntity,
};

#[derive(Clone, Debug)]
pub struct TokenRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl TokenRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenRepository for TokenRepositoryPostgres {
    async fn upsert(
        &self,
        user_id: i32,
        refresh_token: &str,
    ) -> Result<Token, TokenRepositoryError> {
        let row = TokenActiveModel {
            user_id: Set(user_id),
            refresh_token: Set(refresh_token.to_string()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        // Single statement so concurrent saves for one user race on the
        // unique key instead of producing duplicate rows.
        let saved = TokenEntity::insert(row)
            .on_conflict(
                OnConflict::column(TokenColumn::UserId)
                    .update_columns([TokenColumn::RefreshToken, TokenColumn::UpdatedAt])
                    .to_owned(),
            )
            .exec_with_returning(&*self.db)
            .await
            .map_err(|e| TokenRepositoryError::DatabaseError(e.to_string()))?;

        tracing::debug!(user_id, "Refresh token stored");
        Ok(saved.into())
    }

    async fn delete_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<u64, TokenRepositoryError> {
        let result = TokenEntity::delete_many()
            .filter(TokenColumn::RefreshToken.eq(refresh_token))
            .exec(&*self.db)
            .await
            .map_err(|e| TokenRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected)
    }

    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<Token>, TokenRepositoryError> {
        let token = TokenEntity::find()
            .filter(TokenColumn::RefreshToken.eq(refresh_token))
            .one(&*self.db)
            .await
            .map_err(|e| TokenRepositoryError::DatabaseError(e.to_string()))?;

        Ok(token.map(Token::from))
    }
}
