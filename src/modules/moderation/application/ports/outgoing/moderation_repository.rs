use crate::modules::onboarding::application::domain::entities::{AutoModeration, OnboardingStage};
use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

#[async_trait]
pub trait ModerationRepository: Send + Sync {
    /// Record a screening verdict, optionally moving the profile to the
    /// stage that verdict implies, in one write.
    async fn apply_verdict(
        &self,
        profile_id: Uuid,
        verdict: AutoModeration,
        stage: Option<OnboardingStage>,
    ) -> Result<(), ModerationRepositoryError>;
}

#[derive(Debug)]
pub enum ModerationRepositoryError {
    ProfileNotFound,
    DatabaseError(String),
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for ModerationRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModerationRepositoryError::ProfileNotFound => write!(f, "Profile not found"),
            ModerationRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}
