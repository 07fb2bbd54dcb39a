use crate::modules::moderation::application::ports::outgoing::{
    ModerationRepository, ModerationRepositoryError,
};
use crate::modules::onboarding::application::domain::entities::{AutoModeration, OnboardingStage};
use crate::modules::onboarding::application::domain::state_machine::{
    next_stage, TransitionContext, TransitionEvent,
};
use crate::modules::onboarding::application::ports::outgoing::profile_store::ProfileStore;
use crate::modules::onboarding::application::use_cases::auto_approve::{
    ApprovalDecision, IAutoApproveUseCase,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ModerationResult {
    pub profile_id: Uuid,
    pub verdict: AutoModeration,
}

#[derive(Debug, Clone)]
pub struct ModerationIngestOutcome {
    pub verdict: AutoModeration,
    pub stage: OnboardingStage,
    /// Present when a passing verdict triggered an evaluation.
    pub auto_approval: Option<ApprovalDecision>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IngestModerationError {
    ProfileNotFound,
    DatabaseError,
}

#[async_trait]
pub trait IIngestModerationResultUseCase: Send + Sync {
    async fn execute(
        &self,
        result: ModerationResult,
    ) -> Result<ModerationIngestOutcome, IngestModerationError>;
}

/// Applies an automated screening verdict to a profile. Flagged or blocked
/// content parks the profile in the fix stage; a pass releases it back to
/// building and gives the auto-approval gate a chance to take it live.
pub struct IngestModerationResultUseCase<M, S>
where
    M: ModerationRepository,
    S: ProfileStore,
{
    moderation_repository: M,
    profile_store: S,
    auto_approve: Arc<dyn IAutoApproveUseCase + Send + Sync>,
}

impl<M, S> IngestModerationResultUseCase<M, S>
where
    M: ModerationRepository,
    S: ProfileStore,
{
    pub fn new(
        moderation_repository: M,
        profile_store: S,
        auto_approve: Arc<dyn IAutoApproveUseCase + Send + Sync>,
    ) -> Self {
        Self {
            moderation_repository,
            profile_store,
            auto_approve,
        }
    }

    fn stage_consequence(
        current: OnboardingStage,
        verdict: AutoModeration,
    ) -> Option<OnboardingStage> {
        if verdict.requires_fixes() {
            return (current != OnboardingStage::FixModeration)
                .then_some(OnboardingStage::FixModeration);
        }

        if verdict == AutoModeration::AutoPassed {
            let ctx = TransitionContext {
                auto_moderation: verdict,
                ..Default::default()
            };
            return next_stage(current, TransitionEvent::ModerationPass, &ctx);
        }

        None
    }
}

#[async_trait]
impl<M, S> IIngestModerationResultUseCase for IngestModerationResultUseCase<M, S>
where
    M: ModerationRepository + Send + Sync,
    S: ProfileStore + Send + Sync,
{
    async fn execute(
        &self,
        result: ModerationResult,
    ) -> Result<ModerationIngestOutcome, IngestModerationError> {
        let profile = self
            .profile_store
            .find_by_id(result.profile_id)
            .await
            .map_err(|_| IngestModerationError::DatabaseError)?
            .ok_or(IngestModerationError::ProfileNotFound)?;

        let stage_change = Self::stage_consequence(profile.onboarding_stage, result.verdict);

        self.moderation_repository
            .apply_verdict(result.profile_id, result.verdict, stage_change)
            .await
            .map_err(|err| match err {
                ModerationRepositoryError::ProfileNotFound => {
                    IngestModerationError::ProfileNotFound
                }
                ModerationRepositoryError::DatabaseError(_) => IngestModerationError::DatabaseError,
            })?;

        info!(
            profile_id = %result.profile_id,
            verdict = result.verdict.as_str(),
            "moderation verdict recorded"
        );

        let auto_approval = if result.verdict == AutoModeration::AutoPassed {
            Some(self.auto_approve.execute(result.profile_id).await)
        } else {
            None
        };

        Ok(ModerationIngestOutcome {
            verdict: result.verdict,
            stage: stage_change.unwrap_or(profile.onboarding_stage),
            auto_approval,
        })
    }
}
