use super::sea_orm_entity::users::{
    Column as UserColumn, Entity as UserEntity, Model as UserModel,
};
use crate::modules::auth::application::domain::entities::User;
use crate::modules::auth::application::ports::outgoing::{UserQuery, UserQueryError};
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn to_user(model: UserModel) -> Result<User, UserQueryError> {
        let id = model.id;
        User::try_from(model).map_err(|e| {
            tracing::error!(user_id = id, error = %e, "Stored user has an unknown role");
            UserQueryError::CorruptRecord(e.to_string())
        })
    }

    async fn find_one_by(
        &self,
        column: UserColumn,
        value: &str,
    ) -> Result<Option<User>, UserQueryError> {
        UserEntity::find()
            .filter(column.eq(value))
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?
            .map(Self::to_user)
            .transpose()
    }
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, UserQueryError> {
        UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?
            .map(Self::to_user)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        self.find_one_by(UserColumn::Email, email).await
    }

    async fn find_by_activation_link(&self, link: &str) -> Result<Option<User>, UserQueryError> {
        self.find_one_by(UserColumn::ActivationLink, link).await
    }

    async fn find_all(&self) -> Result<Vec<User>, UserQueryError> {
        UserEntity::find()
            .order_by_asc(UserColumn::Id)
            .all(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?
            .into_iter()
            .map(Self::to_user)
            .collect()
    }
}
