use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::identity::application::ports::outgoing::{
    IdentityRepository, IdentityRepositoryError,
};
use crate::modules::onboarding::adapter::outgoing::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Entity as UserEntity,
};
use crate::modules::onboarding::application::domain::entities::IdentityStatus;

#[derive(Clone, Debug)]
pub struct IdentityRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl IdentityRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityRepository for IdentityRepositoryPostgres {
    async fn set_identity_status(
        &self,
        user_id: Uuid,
        status: IdentityStatus,
    ) -> Result<(), IdentityRepositoryError> {
        let user = UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(|e| IdentityRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(IdentityRepositoryError::UserNotFound)?;

        let mut active: UserActiveModel = user.into();
        active.identity_status = Set(status.as_str().to_string());

        active
            .update(&*self.db)
            .await
            .map_err(|e| IdentityRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::onboarding::adapter::outgoing::sea_orm_entity::users::Model as UserModel;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    fn user_model(user_id: Uuid, identity_status: &str) -> UserModel {
        let now = Utc::now().fixed_offset();
        UserModel {
            id: user_id,
            identity_status: identity_status.to_string(),
            role: "user".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_set_identity_status_success() {
        let user_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model(user_id, "pending")]])
            .append_query_results([vec![user_model(user_id, "verified")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repository = IdentityRepositoryPostgres::new(Arc::new(db));

        let result = repository
            .set_identity_status(user_id, IdentityStatus::Verified)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_set_identity_status_user_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<UserModel>::new()])
            .into_connection();

        let repository = IdentityRepositoryPostgres::new(Arc::new(db));

        let result = repository
            .set_identity_status(Uuid::new_v4(), IdentityStatus::Verified)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            IdentityRepositoryError::UserNotFound
        ));
    }

    #[tokio::test]
    async fn test_set_identity_status_database_error_on_update() {
        use sea_orm::DbErr;

        let user_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user_model(user_id, "pending")]])
            .append_query_errors([DbErr::Custom("update failed".to_string())])
            .into_connection();

        let repository = IdentityRepositoryPostgres::new(Arc::new(db));

        let result = repository
            .set_identity_status(user_id, IdentityStatus::Failed)
            .await;

        match result.unwrap_err() {
            IdentityRepositoryError::DatabaseError(msg) => {
                assert!(msg.contains("update failed"));
            }
            other => panic!("Expected DatabaseError, got {:?}", other),
        }
    }
}
