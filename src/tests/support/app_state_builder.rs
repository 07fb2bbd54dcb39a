use crate::identity::application::use_cases::ingest_identity_result::IIngestIdentityResultUseCase;
use crate::moderation::application::use_cases::ingest_moderation_result::IIngestModerationResultUseCase;
use crate::onboarding::application::use_cases::auto_approve::IAutoApproveUseCase;
use crate::onboarding::application::use_cases::onboarding_status::IOnboardingStatusUseCase;
use crate::onboarding::application::use_cases::submit_profile::ISubmitProfileUseCase;
use crate::tests::support::stubs::*;
use crate::AppState;
use actix_web::web;
use std::sync::Arc;

pub struct TestAppStateBuilder {
    auto_approve: Arc<dyn IAutoApproveUseCase + Send + Sync>,
    submit_profile: Arc<dyn ISubmitProfileUseCase + Send + Sync>,
    onboarding_status: Arc<dyn IOnboardingStatusUseCase + Send + Sync>,
    ingest_identity: Arc<dyn IIngestIdentityResultUseCase + Send + Sync>,
    ingest_moderation: Arc<dyn IIngestModerationResultUseCase + Send + Sync>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            auto_approve: Arc::new(StubAutoApproveUseCase),
            submit_profile: Arc::new(StubSubmitProfileUseCase),
            onboarding_status: Arc::new(StubOnboardingStatusUseCase),
            ingest_identity: Arc::new(StubIngestIdentityUseCase),
            ingest_moderation: Arc::new(StubIngestModerationUseCase),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_auto_approve(
        mut self,
        use_case: impl IAutoApproveUseCase + Send + Sync + 'static,
    ) -> Self {
        self.auto_approve = Arc::new(use_case);
        self
    }

    pub fn with_submit_profile(
        mut self,
        use_case: impl ISubmitProfileUseCase + Send + Sync + 'static,
    ) -> Self {
        self.submit_profile = Arc::new(use_case);
        self
    }

    pub fn with_onboarding_status(
        mut self,
        use_case: impl IOnboardingStatusUseCase + Send + Sync + 'static,
    ) -> Self {
        self.onboarding_status = Arc::new(use_case);
        self
    }

    pub fn with_ingest_identity(
        mut self,
        use_case: impl IIngestIdentityResultUseCase + Send + Sync + 'static,
    ) -> Self {
        self.ingest_identity = Arc::new(use_case);
        self
    }

    pub fn with_ingest_moderation(
        mut self,
        use_case: impl IIngestModerationResultUseCase + Send + Sync + 'static,
    ) -> Self {
        self.ingest_moderation = Arc::new(use_case);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            auto_approve_use_case: self.auto_approve,
            submit_profile_use_case: self.submit_profile,
            onboarding_status_use_case: self.onboarding_status,
            ingest_identity_use_case: self.ingest_identity,
            ingest_moderation_use_case: self.ingest_moderation,
        })
    }
}
