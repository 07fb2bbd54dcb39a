use crate::modules::onboarding::application::domain::entities::{
    AdminStatus, OnboardingStage, Profile, PublicationStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Gate values the caller read before deciding to publish. The store must
/// refuse the publish when the row no longer matches, so two racing
/// evaluations cannot both claim the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishGate {
    pub admin_status: AdminStatus,
    pub publication_status: PublicationStatus,
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_id(&self, profile_id: Uuid) -> Result<Option<Profile>, ProfileStoreError>;

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, ProfileStoreError>;

    /// Published, admin-approved profiles owned by someone else that carry
    /// exactly this display name. Exact string equality, the store's own
    /// comparison semantics.
    async fn count_published_with_name(
        &self,
        display_name: &str,
        excluding_user: Uuid,
    ) -> Result<u64, ProfileStoreError>;

    /// Establish the approved/public/live triple in one conditional write.
    /// Fails with `Conflict` when the row moved past `expected` since it
    /// was read.
    async fn publish(
        &self,
        profile_id: Uuid,
        expected: PublishGate,
        approved_at: DateTime<Utc>,
    ) -> Result<(), ProfileStoreError>;

    async fn submit_for_review(
        &self,
        profile_id: Uuid,
        submitted_at: DateTime<Utc>,
    ) -> Result<Profile, ProfileStoreError>;

    async fn set_stage(
        &self,
        profile_id: Uuid,
        stage: OnboardingStage,
    ) -> Result<(), ProfileStoreError>;
}

#[derive(Debug, Clone)]
pub enum ProfileStoreError {
    ProfileNotFound,
    Conflict,
    DatabaseError(String),
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for ProfileStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileStoreError::ProfileNotFound => write!(f, "Profile not found"),
            ProfileStoreError::Conflict => write!(f, "Profile changed concurrently"),
            ProfileStoreError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}
