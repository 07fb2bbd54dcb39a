use crate::modules::onboarding::application::domain::entities::{
    OnboardingStage, Profile, RelationCounts, SubscriptionSnapshot, User,
};
use crate::modules::onboarding::application::domain::state_machine::{
    can_submit_for_review, onboarding_progress, resolve_stage, stage_message, OnboardingProgress,
};
use crate::modules::onboarding::application::ports::outgoing::{
    profile_relations::ProfileRelations, profile_store::ProfileStore, user_query::UserQuery,
};
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum OnboardingStatusError {
    UserNotFound,
    ProfileNotFound,
    DatabaseError,
}

/// Everything the onboarding tracker screen needs in one payload.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingStatus {
    pub stage: OnboardingStage,
    pub progress: u32,
    pub progress_details: OnboardingProgress,
    pub next_action: String,
    pub blockers: Vec<String>,
    pub can_submit: bool,
    pub counts: RelationCounts,
    pub profile: Profile,
    pub user: User,
    pub subscription: Option<SubscriptionSnapshot>,
}

#[async_trait]
pub trait IOnboardingStatusUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<OnboardingStatus, OnboardingStatusError>;
}

#[derive(Debug, Clone)]
pub struct OnboardingStatusUseCase<S, Q, R>
where
    S: ProfileStore,
    Q: UserQuery,
    R: ProfileRelations,
{
    profile_store: S,
    user_query: Q,
    relations: R,
}

impl<S, Q, R> OnboardingStatusUseCase<S, Q, R>
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
impl<S, Q, R> IOnboardingStatusUseCase for OnboardingStatusUseCase<S, Q, R>
where
    S: ProfileStore + Send + Sync,
    Q: UserQuery + Send + Sync,
    R: ProfileRelations + Send + Sync,
{
    async fn execute(&self, user_id: Uuid) -> Result<OnboardingStatus, OnboardingStatusError> {
        let user = self
            .user_query
            .find_by_id(user_id)
            .await
            .map_err(|_| OnboardingStatusError::DatabaseError)?
            .ok_or(OnboardingStatusError::UserNotFound)?;

        let profile = self
            .profile_store
            .find_by_user(user_id)
            .await
            .map_err(|_| OnboardingStatusError::DatabaseError)?
            .ok_or(OnboardingStatusError::ProfileNotFound)?;

        let subscription = self
            .relations
            .active_subscription(user_id)
            .await
            .map_err(|_| OnboardingStatusError::DatabaseError)?;

        let counts = self
            .relations
            .counts_for(profile.id)
            .await
            .map_err(|_| OnboardingStatusError::DatabaseError)?;

        let owner = User {
            id: user.id,
            identity_status: user.identity_status,
            role: user.role,
        };

        let stage = resolve_stage(&profile, &owner, subscription.as_ref(), &counts);
        let validation = can_submit_for_review(&profile, &owner, subscription.as_ref(), &counts);
        let progress_details = onboarding_progress(stage, subscription.is_some());
        let message = stage_message(stage);

        Ok(OnboardingStatus {
            stage,
            progress: progress_details.percent_complete,
            progress_details,
            next_action: message.to_string(),
            blockers: validation.missing,
            can_submit: validation.valid,
            counts,
            profile,
            user: owner,
            subscription,
        })
    }
}
