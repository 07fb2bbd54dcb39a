use async_trait::async_trait;
use uuid::Uuid;

use crate::identity::application::use_cases::ingest_identity_result::{
    IIngestIdentityResultUseCase, IdentityIngestOutcome, IdentityResult, IngestIdentityError,
};
use crate::moderation::application::use_cases::ingest_moderation_result::{
    IIngestModerationResultUseCase, IngestModerationError, ModerationIngestOutcome,
    ModerationResult,
};
use crate::onboarding::application::domain::entities::{
    AutoModeration, IdentityStatus, OnboardingStage,
};
use crate::onboarding::application::use_cases::auto_approve::{
    ApprovalDecision, ApprovalReason, IAutoApproveUseCase,
};
use crate::onboarding::application::use_cases::onboarding_status::{
    IOnboardingStatusUseCase, OnboardingStatus, OnboardingStatusError,
};
use crate::onboarding::application::use_cases::submit_profile::{
    ISubmitProfileUseCase, SubmitProfileError, SubmitProfileOutput,
};

// Innocuous defaults so handler tests only need to override the use case
// under test.

pub struct StubAutoApproveUseCase;

#[async_trait]
impl IAutoApproveUseCase for StubAutoApproveUseCase {
    async fn execute(&self, _profile_id: Uuid) -> ApprovalDecision {
        ApprovalDecision {
            approved: false,
            reason: Some(ApprovalReason::ProfileNotFound),
        }
    }
}

pub struct StubSubmitProfileUseCase;

#[async_trait]
impl ISubmitProfileUseCase for StubSubmitProfileUseCase {
    async fn execute(&self, _user_id: Uuid) -> Result<SubmitProfileOutput, SubmitProfileError> {
        Err(SubmitProfileError::UserNotFound)
    }
}

pub struct StubOnboardingStatusUseCase;

#[async_trait]
impl IOnboardingStatusUseCase for StubOnboardingStatusUseCase {
    async fn execute(&self, _user_id: Uuid) -> Result<OnboardingStatus, OnboardingStatusError> {
        Err(OnboardingStatusError::UserNotFound)
    }
}

pub struct StubIngestIdentityUseCase;

#[async_trait]
impl IIngestIdentityResultUseCase for StubIngestIdentityUseCase {
    async fn execute(
        &self,
        _result: IdentityResult,
    ) -> Result<IdentityIngestOutcome, IngestIdentityError> {
        Ok(IdentityIngestOutcome {
            identity_status: IdentityStatus::Pending,
            auto_approval: None,
        })
    }
}

pub struct StubIngestModerationUseCase;

#[async_trait]
impl IIngestModerationResultUseCase for StubIngestModerationUseCase {
    async fn execute(
        &self,
        _result: ModerationResult,
    ) -> Result<ModerationIngestOutcome, IngestModerationError> {
        Ok(ModerationIngestOutcome {
            verdict: AutoModeration::Draft,
            stage: OnboardingStage::BuildProfile,
            auto_approval: None,
        })
    }
}
