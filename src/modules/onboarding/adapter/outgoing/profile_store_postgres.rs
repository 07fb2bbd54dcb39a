use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::onboarding::application::domain::entities::{
    AdminStatus, AutoModeration, OnboardingStage, Profile, PublicationStatus,
};
use crate::modules::onboarding::application::ports::outgoing::profile_store::{
    ProfileStore, ProfileStoreError, PublishGate,
};

use super::sea_orm_entity::profiles::{
    ActiveModel as ProfileActiveModel, Column as ProfileColumn, Entity as ProfileEntity,
    Model as ProfileModel,
};

#[derive(Clone, Debug)]
pub struct ProfileStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl ProfileStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    // A row with an unknown tag is corrupt as far as the domain is
    // concerned; surface it like any other storage failure.
    fn map_to_profile(model: ProfileModel) -> Result<Profile, ProfileStoreError> {
        Ok(Profile {
            id: model.id,
            user_id: model.user_id,
            onboarding_stage: OnboardingStage::from_str(&model.onboarding_stage)
                .map_err(ProfileStoreError::DatabaseError)?,
            auto_moderation: AutoModeration::from_str(&model.auto_moderation)
                .map_err(ProfileStoreError::DatabaseError)?,
            admin_status: AdminStatus::from_str(&model.admin_status)
                .map_err(ProfileStoreError::DatabaseError)?,
            publication_status: PublicationStatus::from_str(&model.publication_status)
                .map_err(ProfileStoreError::DatabaseError)?,
            display_name: model.display_name,
            city_slug: model.city_slug,
            phone_public_e164: model.phone_public_e164,
            incall_enabled: model.incall_enabled,
            outcall_enabled: model.outcall_enabled,
            admin_notes: model.admin_notes,
            submitted_at: model.submitted_at.map(|t| t.with_timezone(&Utc)),
            approved_at: model.approved_at.map(|t| t.with_timezone(&Utc)),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl ProfileStore for ProfileStorePostgres {
    async fn find_by_id(&self, profile_id: Uuid) -> Result<Option<Profile>, ProfileStoreError> {
        let model = ProfileEntity::find_by_id(profile_id)
            .one(&*self.db)
            .await
            .map_err(|e| ProfileStoreError::DatabaseError(e.to_string()))?;

        model.map(Self::map_to_profile).transpose()
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, ProfileStoreError> {
        let model = ProfileEntity::find()
            .filter(ProfileColumn::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(|e| ProfileStoreError::DatabaseError(e.to_string()))?;

        model.map(Self::map_to_profile).transpose()
    }

    async fn count_published_with_name(
        &self,
        display_name: &str,
        excluding_user: Uuid,
    ) -> Result<u64, ProfileStoreError> {
        ProfileEntity::find()
            .filter(ProfileColumn::DisplayName.eq(display_name))
            .filter(ProfileColumn::PublicationStatus.eq(PublicationStatus::Public.as_str()))
            .filter(ProfileColumn::AdminStatus.eq(AdminStatus::Approved.as_str()))
            .filter(ProfileColumn::UserId.ne(excluding_user))
            .count(&*self.db)
            .await
            .map_err(|e| ProfileStoreError::DatabaseError(e.to_string()))
    }

    async fn publish(
        &self,
        profile_id: Uuid,
        expected: PublishGate,
        approved_at: DateTime<Utc>,
    ) -> Result<(), ProfileStoreError> {
        // Single conditional UPDATE: the gate columns must still hold the
        // values the caller read, otherwise no row matches and the caller
        // sees a conflict instead of clobbering a concurrent decision.
        let result = ProfileEntity::update_many()
            .col_expr(
                ProfileColumn::AdminStatus,
                Expr::value(AdminStatus::Approved.as_str()),
            )
            .col_expr(
                ProfileColumn::PublicationStatus,
                Expr::value(PublicationStatus::Public.as_str()),
            )
            .col_expr(
                ProfileColumn::OnboardingStage,
                Expr::value(OnboardingStage::Live.as_str()),
            )
            .col_expr(ProfileColumn::ApprovedAt, Expr::value(approved_at))
            .col_expr(ProfileColumn::UpdatedAt, Expr::value(Utc::now()))
            .filter(ProfileColumn::Id.eq(profile_id))
            .filter(ProfileColumn::AdminStatus.eq(expected.admin_status.as_str()))
            .filter(ProfileColumn::PublicationStatus.eq(expected.publication_status.as_str()))
            .exec(&*self.db)
            .await
            .map_err(|e| ProfileStoreError::DatabaseError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(ProfileStoreError::Conflict);
        }

        Ok(())
    }

    async fn submit_for_review(
        &self,
        profile_id: Uuid,
        submitted_at: DateTime<Utc>,
    ) -> Result<Profile, ProfileStoreError> {
        let model = ProfileEntity::find_by_id(profile_id)
            .one(&*self.db)
            .await
            .map_err(|e| ProfileStoreError::DatabaseError(e.to_string()))?
            .ok_or(ProfileStoreError::ProfileNotFound)?;

        let mut active: ProfileActiveModel = model.into();
        active.admin_status = Set(AdminStatus::PendingAdmin.as_str().to_string());
        active.onboarding_stage = Set(OnboardingStage::WaitingAdmin.as_str().to_string());
        active.submitted_at = Set(Some(submitted_at.into()));

        let updated = active
            .update(&*self.db)
            .await
            .map_err(|e| ProfileStoreError::DatabaseError(e.to_string()))?;

        Self::map_to_profile(updated)
    }

    async fn set_stage(
        &self,
        profile_id: Uuid,
        stage: OnboardingStage,
    ) -> Result<(), ProfileStoreError> {
        let model = ProfileEntity::find_by_id(profile_id)
            .one(&*self.db)
            .await
            .map_err(|e| ProfileStoreError::DatabaseError(e.to_string()))?
            .ok_or(ProfileStoreError::ProfileNotFound)?;

        let mut active: ProfileActiveModel = model.into();
        active.onboarding_stage = Set(stage.as_str().to_string());

        active
            .update(&*self.db)
            .await
            .map_err(|e| ProfileStoreError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
