use crate::modules::identity::application::ports::outgoing::{
    IdentityRepository, IdentityRepositoryError,
};
use crate::modules::onboarding::application::domain::entities::{IdentityStatus, OnboardingStage};
use crate::modules::onboarding::application::ports::outgoing::profile_store::ProfileStore;
use crate::modules::onboarding::application::use_cases::auto_approve::{
    ApprovalDecision, IAutoApproveUseCase,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Terminal outcomes the verification provider reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityOutcome {
    Verified,
    Failed,
}

#[derive(Debug, Clone)]
pub struct IdentityResult {
    pub user_id: Uuid,
    pub outcome: IdentityOutcome,
}

#[derive(Debug, Clone)]
pub struct IdentityIngestOutcome {
    pub identity_status: IdentityStatus,
    /// Present when a verified outcome triggered an evaluation of the
    /// user's profile.
    pub auto_approval: Option<ApprovalDecision>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IngestIdentityError {
    UserNotFound,
    DatabaseError,
}

#[async_trait]
pub trait IIngestIdentityResultUseCase: Send + Sync {
    async fn execute(
        &self,
        result: IdentityResult,
    ) -> Result<IdentityIngestOutcome, IngestIdentityError>;
}

/// Applies a verification outcome to the owning user and lets the
/// auto-approval gate react. A verified identity is one of the events that
/// can take a waiting profile live without an admin touching it.
pub struct IngestIdentityResultUseCase<R, S>
where
    R: IdentityRepository,
    S: ProfileStore,
{
    identity_repository: R,
    profile_store: S,
    auto_approve: Arc<dyn IAutoApproveUseCase + Send + Sync>,
}

impl<R, S> IngestIdentityResultUseCase<R, S>
where
    R: IdentityRepository,
    S: ProfileStore,
{
    pub fn new(
        identity_repository: R,
        profile_store: S,
        auto_approve: Arc<dyn IAutoApproveUseCase + Send + Sync>,
    ) -> Self {
        Self {
            identity_repository,
            profile_store,
            auto_approve,
        }
    }
}

#[async_trait]
impl<R, S> IIngestIdentityResultUseCase for IngestIdentityResultUseCase<R, S>
where
    R: IdentityRepository + Send + Sync,
    S: ProfileStore + Send + Sync,
{
    async fn execute(
        &self,
        result: IdentityResult,
    ) -> Result<IdentityIngestOutcome, IngestIdentityError> {
        let status = match result.outcome {
            IdentityOutcome::Verified => IdentityStatus::Verified,
            IdentityOutcome::Failed => IdentityStatus::Failed,
        };

        self.identity_repository
            .set_identity_status(result.user_id, status)
            .await
            .map_err(|err| match err {
                IdentityRepositoryError::UserNotFound => IngestIdentityError::UserNotFound,
                IdentityRepositoryError::DatabaseError(_) => IngestIdentityError::DatabaseError,
            })?;

        info!(user_id = %result.user_id, status = status.as_str(), "identity status recorded");

        // The webhook can arrive before the user ever created a profile;
        // that is not an error.
        let profile = match self.profile_store.find_by_user(result.user_id).await {
            Ok(profile) => profile,
            Err(err) => {
                warn!(user_id = %result.user_id, "identity ingest: profile lookup failed: {}", err);
                None
            }
        };

        let auto_approval = match (result.outcome, profile) {
            (IdentityOutcome::Verified, Some(profile)) => {
                Some(self.auto_approve.execute(profile.id).await)
            }
            (IdentityOutcome::Failed, Some(profile)) => {
                self.profile_store
                    .set_stage(profile.id, OnboardingStage::Blocked)
                    .await
                    .map_err(|_| IngestIdentityError::DatabaseError)?;
                None
            }
            (_, None) => None,
        };

        Ok(IdentityIngestOutcome {
            identity_status: status,
            auto_approval,
        })
    }
}
