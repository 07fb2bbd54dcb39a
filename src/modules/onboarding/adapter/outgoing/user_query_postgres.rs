use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::onboarding::application::domain::entities::{IdentityStatus, UserRole};
use crate::modules::onboarding::application::ports::outgoing::user_query::{
    UserQuery, UserQueryError, UserQueryResult,
};

use super::sea_orm_entity::users::{Entity as UserEntity, Model as UserModel};

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_result(model: UserModel) -> Result<UserQueryResult, UserQueryError> {
        Ok(UserQueryResult {
            id: model.id,
            identity_status: IdentityStatus::from_str(&model.identity_status)
                .map_err(UserQueryError::DatabaseError)?,
            role: UserRole::from_str(&model.role).map_err(UserQueryError::DatabaseError)?,
        })
    }
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserQueryResult>, UserQueryError> {
        let model = UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?;

        model.map(Self::map_to_result).transpose()
    }
}
