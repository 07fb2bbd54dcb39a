use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::moderation::application::ports::outgoing::{
    ModerationRepository, ModerationRepositoryError,
};
use crate::modules::onboarding::adapter::outgoing::sea_orm_entity::profiles::{
    ActiveModel as ProfileActiveModel, Entity as ProfileEntity,
};
use crate::modules::onboarding::application::domain::entities::{AutoModeration, OnboardingStage};

#[derive(Clone, Debug)]
pub struct ModerationRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ModerationRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ModerationRepository for ModerationRepositoryPostgres {
    async fn apply_verdict(
        &self,
        profile_id: Uuid,
        verdict: AutoModeration,
        stage: Option<OnboardingStage>,
    ) -> Result<(), ModerationRepositoryError> {
        let profile = ProfileEntity::find_by_id(profile_id)
            .one(&*self.db)
            .await
            .map_err(|e| ModerationRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(ModerationRepositoryError::ProfileNotFound)?;

        let mut active: ProfileActiveModel = profile.into();
        active.auto_moderation = Set(verdict.as_str().to_string());
        if let Some(stage) = stage {
            active.onboarding_stage = Set(stage.as_str().to_string());
        }

        active
            .update(&*self.db)
            .await
            .map_err(|e| ModerationRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
