use crate::modules::onboarding::application::domain::entities::{AutoModeration, IdentityStatus};
use crate::modules::onboarding::application::ports::outgoing::{
    profile_store::{ProfileStore, PublishGate},
    user_query::UserQuery,
};
use async_trait::async_trait;
use chrono::Utc;
use std::fmt;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Why an evaluation did or did not publish the profile. `AlreadyLive`
/// accompanies an approved decision; everything else denies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalReason {
    ProfileNotFound,
    ModerationNotPassed,
    AlreadyLive,
    IdentityNotVerified,
    DuplicateDisplayName,
    PublishFailed,
}

impl ApprovalReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalReason::ProfileNotFound => "Profile not found",
            ApprovalReason::ModerationNotPassed => "Profile has not passed auto moderation",
            ApprovalReason::AlreadyLive => "Profile already live",
            ApprovalReason::IdentityNotVerified => "Identity is not verified",
            ApprovalReason::DuplicateDisplayName => "Duplicate profile already exists",
            ApprovalReason::PublishFailed => "Failed to publish profile",
        }
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for ApprovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalDecision {
    pub approved: bool,
    pub reason: Option<ApprovalReason>,
}

impl ApprovalDecision {
    fn approved() -> Self {
        Self {
            approved: true,
            reason: None,
        }
    }

    fn already_live() -> Self {
        Self {
            approved: true,
            reason: Some(ApprovalReason::AlreadyLive),
        }
    }

    fn denied(reason: ApprovalReason) -> Self {
        Self {
            approved: false,
            reason: Some(reason),
        }
    }
}

#[async_trait]
pub trait IAutoApproveUseCase: Send + Sync {
    async fn execute(&self, profile_id: Uuid) -> ApprovalDecision;
}

/// Decides whether a profile may go live without human review.
///
/// Ordered, short-circuiting checks over stored state; the only write is
/// the final conditional publish. Failures never escape as errors: the
/// caller branches on the returned decision and may simply invoke again
/// later, since every call recomputes from the store.
#[derive(Debug, Clone)]
pub struct AutoApproveUseCase<S, Q>
where
    S: ProfileStore,
    Q: UserQuery,
{
    profile_store: S,
    user_query: Q,
}

impl<S, Q> AutoApproveUseCase<S, Q>
where
    S: ProfileStore,
    Q: UserQuery,
{
    pub fn new(profile_store: S, user_query: Q) -> Self {
        Self {
            profile_store,
            user_query,
        }
    }
}

#[async_trait]
impl<S, Q> IAutoApproveUseCase for AutoApproveUseCase<S, Q>
where
    S: ProfileStore + Send + Sync,
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self, profile_id: Uuid) -> ApprovalDecision {
        let profile = match self.profile_store.find_by_id(profile_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => return ApprovalDecision::denied(ApprovalReason::ProfileNotFound),
            Err(err) => {
                warn!(%profile_id, "auto-approve: profile lookup failed: {}", err);
                return ApprovalDecision::denied(ApprovalReason::ProfileNotFound);
            }
        };

        if profile.auto_moderation != AutoModeration::AutoPassed {
            return ApprovalDecision::denied(ApprovalReason::ModerationNotPassed);
        }

        // Safe to invoke repeatedly: a profile that already went live is
        // reported approved without touching the store again.
        if profile.is_live() {
            return ApprovalDecision::already_live();
        }

        let user = match self.user_query.find_by_id(profile.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return ApprovalDecision::denied(ApprovalReason::IdentityNotVerified),
            Err(err) => {
                warn!(%profile_id, "auto-approve: owner lookup failed: {}", err);
                return ApprovalDecision::denied(ApprovalReason::IdentityNotVerified);
            }
        };

        if user.identity_status != IdentityStatus::Verified {
            return ApprovalDecision::denied(ApprovalReason::IdentityNotVerified);
        }

        if let Some(name) = profile.display_name.as_deref().filter(|n| !n.is_empty()) {
            match self
                .profile_store
                .count_published_with_name(name, profile.user_id)
                .await
            {
                Ok(0) => {}
                Ok(_) => {
                    return ApprovalDecision::denied(ApprovalReason::DuplicateDisplayName)
                }
                Err(err) => {
                    warn!(%profile_id, "auto-approve: duplicate check failed: {}", err);
                    return ApprovalDecision::denied(ApprovalReason::PublishFailed);
                }
            }
        }

        // Conditioned on the gate values read above so a racing evaluation
        // or admin action cannot be overwritten.
        let gate = PublishGate {
            admin_status: profile.admin_status,
            publication_status: profile.publication_status,
        };

        match self
            .profile_store
            .publish(profile.id, gate, Utc::now())
            .await
        {
            Ok(()) => {
                info!(%profile_id, "auto-approve: profile published");
                ApprovalDecision::approved()
            }
            Err(err) => {
                error!(%profile_id, "Auto-approve update failed: {}", err);
                ApprovalDecision::denied(ApprovalReason::PublishFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::onboarding::application::domain::entities::{
        AdminStatus, OnboardingStage, Profile, PublicationStatus, UserRole,
    };
    use crate::modules::onboarding::application::ports::outgoing::{
        profile_store::{ProfileStore, ProfileStoreError, PublishGate},
        user_query::{UserQuery, UserQueryError, UserQueryResult},
    };
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use mockall::{mock, predicate::*};
    use uuid::Uuid;

    mock! {
        pub ProfileStoreMock {}
        #[async_trait]
        impl ProfileStore for ProfileStoreMock {
            async fn find_by_id(&self, profile_id: Uuid) -> Result<Option<Profile>, ProfileStoreError>;

            async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, ProfileStoreError>;

            async fn count_published_with_name(
                &self,
                display_name: &str,
                excluding_user: Uuid,
            ) -> Result<u64, ProfileStoreError>;

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
    }

    mock! {
        pub UserQueryMock {}
        #[async_trait]
        impl UserQuery for UserQueryMock {
            async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserQueryResult>, UserQueryError>;
        }
    }

    fn candidate_profile(profile_id: Uuid, user_id: Uuid) -> Profile {
        let now = Utc::now();
        Profile {
            id: profile_id,
            user_id,
            onboarding_stage: OnboardingStage::WaitingAdmin,
            auto_moderation: AutoModeration::AutoPassed,
            admin_status: AdminStatus::PendingAdmin,
            publication_status: PublicationStatus::Private,
            display_name: Some("Alex Santos".to_string()),
            city_slug: Some("austin".to_string()),
            phone_public_e164: Some("+15125550100".to_string()),
            incall_enabled: true,
            outcall_enabled: false,
            admin_notes: None,
            submitted_at: Some(now),
            approved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn verified_user(user_id: Uuid) -> UserQueryResult {
        UserQueryResult {
            id: user_id,
            identity_status: IdentityStatus::Verified,
            role: UserRole::User,
        }
    }

    #[tokio::test]
    async fn test_missing_profile_is_denied_without_writes() {
        let profile_id = Uuid::new_v4();

        let mut store = MockProfileStoreMock::new();
        store
            .expect_find_by_id()
            .with(eq(profile_id))
            .times(1)
            .returning(|_| Ok(None));
        store.expect_publish().times(0);

        let use_case = AutoApproveUseCase::new(store, MockUserQueryMock::new());

        let decision = use_case.execute(profile_id).await;

        assert!(!decision.approved);
        assert_eq!(decision.reason, Some(ApprovalReason::ProfileNotFound));
    }

    #[tokio::test]
    async fn test_profile_lookup_error_is_denied_as_not_found() {
        let profile_id = Uuid::new_v4();

        let mut store = MockProfileStoreMock::new();
        store
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(ProfileStoreError::DatabaseError("timeout".to_string())));

        let use_case = AutoApproveUseCase::new(store, MockUserQueryMock::new());

        let decision = use_case.execute(profile_id).await;

        assert!(!decision.approved);
        assert_eq!(decision.reason, Some(ApprovalReason::ProfileNotFound));
    }

    #[tokio::test]
    async fn test_unmoderated_profile_is_denied_regardless_of_identity() {
        let profile_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        for verdict in [
            AutoModeration::Draft,
            AutoModeration::AutoFlagged,
            AutoModeration::AutoBlocked,
        ] {
            let mut store = MockProfileStoreMock::new();
            let mut profile = candidate_profile(profile_id, user_id);
            profile.auto_moderation = verdict;
            store
                .expect_find_by_id()
                .times(1)
                .returning(move |_| Ok(Some(profile.clone())));
            store.expect_publish().times(0);

            // Identity is never consulted once moderation fails
            let users = MockUserQueryMock::new();

            let use_case = AutoApproveUseCase::new(store, users);
            let decision = use_case.execute(profile_id).await;

            assert!(!decision.approved);
            assert_eq!(decision.reason, Some(ApprovalReason::ModerationNotPassed));
        }
    }

    #[tokio::test]
    async fn test_already_live_profile_is_approved_without_writes() {
        let profile_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut profile = candidate_profile(profile_id, user_id);
        profile.admin_status = AdminStatus::Approved;
        profile.publication_status = PublicationStatus::Public;
        profile.onboarding_stage = OnboardingStage::Live;

        let mut store = MockProfileStoreMock::new();
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(profile.clone())));
        store.expect_count_published_with_name().times(0);
        store.expect_publish().times(0);

        let use_case = AutoApproveUseCase::new(store, MockUserQueryMock::new());
        let decision = use_case.execute(profile_id).await;

        assert!(decision.approved);
        assert_eq!(decision.reason, Some(ApprovalReason::AlreadyLive));
    }

    #[tokio::test]
    async fn test_unverified_identity_is_denied() {
        let profile_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut store = MockProfileStoreMock::new();
        let profile = candidate_profile(profile_id, user_id);
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(profile.clone())));
        store.expect_publish().times(0);

        let mut users = MockUserQueryMock::new();
        users.expect_find_by_id().with(eq(user_id)).times(1).returning(|id| {
            Ok(Some(UserQueryResult {
                id,
                identity_status: IdentityStatus::Pending,
                role: UserRole::User,
            }))
        });

        let use_case = AutoApproveUseCase::new(store, users);
        let decision = use_case.execute(profile_id).await;

        assert!(!decision.approved);
        assert_eq!(decision.reason, Some(ApprovalReason::IdentityNotVerified));
    }

    #[tokio::test]
    async fn test_missing_owner_is_denied_as_unverified() {
        let profile_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut store = MockProfileStoreMock::new();
        let profile = candidate_profile(profile_id, user_id);
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(profile.clone())));
        store.expect_publish().times(0);

        let mut users = MockUserQueryMock::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let use_case = AutoApproveUseCase::new(store, users);
        let decision = use_case.execute(profile_id).await;

        assert!(!decision.approved);
        assert_eq!(decision.reason, Some(ApprovalReason::IdentityNotVerified));
    }

    #[tokio::test]
    async fn test_duplicate_display_name_is_denied() {
        let profile_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut store = MockProfileStoreMock::new();
        let profile = candidate_profile(profile_id, user_id);
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(profile.clone())));
        store
            .expect_count_published_with_name()
            .withf(move |name, excluding| name == "Alex Santos" && *excluding == user_id)
            .times(1)
            .returning(|_, _| Ok(1));
        store.expect_publish().times(0);

        let mut users = MockUserQueryMock::new();
        users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(verified_user(id))));

        let use_case = AutoApproveUseCase::new(store, users);
        let decision = use_case.execute(profile_id).await;

        assert!(!decision.approved);
        assert_eq!(decision.reason, Some(ApprovalReason::DuplicateDisplayName));
    }

    #[tokio::test]
    async fn test_profile_without_display_name_skips_duplicate_check() {
        let profile_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut store = MockProfileStoreMock::new();
        let mut profile = candidate_profile(profile_id, user_id);
        profile.display_name = None;
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(profile.clone())));
        store.expect_count_published_with_name().times(0);
        store
            .expect_publish()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut users = MockUserQueryMock::new();
        users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(verified_user(id))));

        let use_case = AutoApproveUseCase::new(store, users);
        let decision = use_case.execute(profile_id).await;

        assert!(decision.approved);
        assert_eq!(decision.reason, None);
    }

    #[tokio::test]
    async fn test_passing_profile_is_published_with_gate_from_read_state() {
        let profile_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut store = MockProfileStoreMock::new();
        let profile = candidate_profile(profile_id, user_id);
        store
            .expect_find_by_id()
            .with(eq(profile_id))
            .times(1)
            .returning(move |_| Ok(Some(profile.clone())));
        store
            .expect_count_published_with_name()
            .times(1)
            .returning(|_, _| Ok(0));
        store
            .expect_publish()
            .withf(move |id, gate, _approved_at| {
                *id == profile_id
                    && *gate
                        == PublishGate {
                            admin_status: AdminStatus::PendingAdmin,
                            publication_status: PublicationStatus::Private,
                        }
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut users = MockUserQueryMock::new();
        users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(verified_user(id))));

        let use_case = AutoApproveUseCase::new(store, users);
        let decision = use_case.execute(profile_id).await;

        assert!(decision.approved);
        assert_eq!(decision.reason, None);
    }

    #[tokio::test]
    async fn test_publish_conflict_is_surfaced_as_publish_failure() {
        let profile_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut store = MockProfileStoreMock::new();
        let profile = candidate_profile(profile_id, user_id);
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(profile.clone())));
        store
            .expect_count_published_with_name()
            .times(1)
            .returning(|_, _| Ok(0));
        store
            .expect_publish()
            .times(1)
            .returning(|_, _, _| Err(ProfileStoreError::Conflict));

        let mut users = MockUserQueryMock::new();
        users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(verified_user(id))));

        let use_case = AutoApproveUseCase::new(store, users);
        let decision = use_case.execute(profile_id).await;

        assert!(!decision.approved);
        assert_eq!(decision.reason, Some(ApprovalReason::PublishFailed));
    }

    #[tokio::test]
    async fn test_publish_database_error_is_surfaced_as_publish_failure() {
        let profile_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut store = MockProfileStoreMock::new();
        let profile = candidate_profile(profile_id, user_id);
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(profile.clone())));
        store
            .expect_count_published_with_name()
            .times(1)
            .returning(|_, _| Ok(0));
        store
            .expect_publish()
            .times(1)
            .returning(|_, _, _| Err(ProfileStoreError::DatabaseError("update failed".to_string())));

        let mut users = MockUserQueryMock::new();
        users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(verified_user(id))));

        let use_case = AutoApproveUseCase::new(store, users);
        let decision = use_case.execute(profile_id).await;

        assert!(!decision.approved);
        assert_eq!(decision.reason, Some(ApprovalReason::PublishFailed));
    }

    #[tokio::test]
    async fn test_duplicate_check_error_denies_instead_of_passing() {
        let profile_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let mut store = MockProfileStoreMock::new();
        let profile = candidate_profile(profile_id, user_id);
        store
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(profile.clone())));
        store
            .expect_count_published_with_name()
            .times(1)
            .returning(|_, _| Err(ProfileStoreError::DatabaseError("timeout".to_string())));
        store.expect_publish().times(0);

        let mut users = MockUserQueryMock::new();
        users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(verified_user(id))));

        let use_case = AutoApproveUseCase::new(store, users);
        let decision = use_case.execute(profile_id).await;

        assert!(!decision.approved);
        assert_eq!(decision.reason, Some(ApprovalReason::PublishFailed));
    }
}
