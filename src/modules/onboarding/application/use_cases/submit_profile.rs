use crate::modules::onboarding::application::domain::entities::{
    AdminStatus, OnboardingStage, User,
};
use crate::modules::onboarding::application::domain::state_machine::can_submit_for_review;
use crate::modules::onboarding::application::ports::outgoing::{
    profile_relations::ProfileRelations,
    profile_store::{ProfileStore, ProfileStoreError},
    user_query::UserQuery,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitProfileError {
    UserNotFound,
    ProfileNotFound,
    AlreadySubmitted,
    ProfileIncomplete(Vec<String>),
    DatabaseError,
}

#[derive(Debug, Clone)]
pub struct SubmitProfileOutput {
    pub profile_id: Uuid,
    pub submitted_at: Option<DateTime<Utc>>,
    pub admin_status: AdminStatus,
    pub next_stage: OnboardingStage,
}

#[async_trait]
pub trait ISubmitProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<SubmitProfileOutput, SubmitProfileError>;
}

/// Sends a complete profile into the admin review queue. The checklist runs
/// here so an incomplete profile is rejected with its blockers instead of
/// landing half-built in front of an admin.
#[derive(Debug, Clone)]
pub struct SubmitProfileUseCase<S, Q, R>
where
    S: ProfileStore,
    Q: UserQuery,
    R: ProfileRelations,
{
    profile_store: S,
    user_query: Q,
    relations: R,
}

impl<S, Q, R> SubmitProfileUseCase<S, Q, R>
where
    S: ProfileStore,
    Q: UserQuery,
    R: ProfileRelations,
{
    pub fn new(profile_store: S, user_query: Q, relations: R) -> Self {
        Self {
            profile_store,
            user_query,
            relations,
        }
    }
}

#[async_trait]
impl<S, Q, R> ISubmitProfileUseCase for SubmitProfileUseCase<S, Q, R>
where
    S: ProfileStore + Send + Sync,
    Q: UserQuery + Send + Sync,
    R: ProfileRelations + Send + Sync,
{
    async fn execute(&self, user_id: Uuid) -> Result<SubmitProfileOutput, SubmitProfileError> {
        let user = self
            .user_query
            .find_by_id(user_id)
            .await
            .map_err(|_| SubmitProfileError::DatabaseError)?
            .ok_or(SubmitProfileError::UserNotFound)?;

        let profile = self
            .profile_store
            .find_by_user(user_id)
            .await
            .map_err(|_| SubmitProfileError::DatabaseError)?
            .ok_or(SubmitProfileError::ProfileNotFound)?;

        if profile.admin_status == AdminStatus::PendingAdmin {
            return Err(SubmitProfileError::AlreadySubmitted);
        }

        let subscription = self
            .relations
            .active_subscription(user_id)
            .await
            .map_err(|_| SubmitProfileError::DatabaseError)?;

        let counts = self
            .relations
            .counts_for(profile.id)
            .await
            .map_err(|_| SubmitProfileError::DatabaseError)?;

        let owner = User {
            id: user.id,
            identity_status: user.identity_status,
            role: user.role,
        };
        let validation = can_submit_for_review(&profile, &owner, subscription.as_ref(), &counts);
        if !validation.valid {
            return Err(SubmitProfileError::ProfileIncomplete(validation.missing));
        }

        let submitted = self
            .profile_store
            .submit_for_review(profile.id, Utc::now())
            .await
            .map_err(|err| match err {
                ProfileStoreError::ProfileNotFound => SubmitProfileError::ProfileNotFound,
                _ => SubmitProfileError::DatabaseError,
            })?;

        Ok(SubmitProfileOutput {
            profile_id: submitted.id,
            submitted_at: submitted.submitted_at,
            admin_status: submitted.admin_status,
            next_stage: submitted.onboarding_stage,
        })
    }
}
