use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::onboarding::application::domain::entities::{
    AdminStatus, IdentityStatus, OnboardingStage, Profile, PublicationStatus, UserRole,
};
use crate::onboarding::application::ports::outgoing::profile_store::{
    ProfileStore, ProfileStoreError, PublishGate,
};
use crate::onboarding::application::ports::outgoing::user_query::{
    UserQuery, UserQueryError, UserQueryResult,
};

/// In-memory substitute for the Postgres adapters. Clones share state the
/// way the real adapters share a connection, mirrors the conditional
/// publish semantics, and counts publish attempts so tests can assert
/// "no write happened".
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    profiles: Mutex<HashMap<Uuid, Profile>>,
    users: Mutex<HashMap<Uuid, IdentityStatus>>,
    publish_calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_user(&self, user_id: Uuid, identity_status: IdentityStatus) {
        self.inner
            .users
            .lock()
            .unwrap()
            .insert(user_id, identity_status);
    }

    pub fn insert_profile(&self, profile: Profile) {
        self.inner
            .profiles
            .lock()
            .unwrap()
            .insert(profile.id, profile);
    }

    pub fn profile(&self, profile_id: Uuid) -> Option<Profile> {
        self.inner.profiles.lock().unwrap().get(&profile_id).cloned()
    }

    pub fn update_profile<F>(&self, profile_id: Uuid, mutate: F)
    where
        F: FnOnce(&mut Profile),
    {
        let mut profiles = self.inner.profiles.lock().unwrap();
        if let Some(profile) = profiles.get_mut(&profile_id) {
            mutate(profile);
        }
    }

    pub fn publish_call_count(&self) -> usize {
        self.inner.publish_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn find_by_id(&self, profile_id: Uuid) -> Result<Option<Profile>, ProfileStoreError> {
        Ok(self.inner.profiles.lock().unwrap().get(&profile_id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, ProfileStoreError> {
        Ok(self
            .inner
            .profiles
            .lock()
            .unwrap()
            .values()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn count_published_with_name(
        &self,
        display_name: &str,
        excluding_user: Uuid,
    ) -> Result<u64, ProfileStoreError> {
        let count = self
            .inner
            .profiles
            .lock()
            .unwrap()
            .values()
            .filter(|p| {
                p.user_id != excluding_user
                    && p.display_name.as_deref() == Some(display_name)
                    && p.publication_status == PublicationStatus::Public
                    && p.admin_status == AdminStatus::Approved
            })
            .count();
        Ok(count as u64)
    }

    async fn publish(
        &self,
        profile_id: Uuid,
        expected: PublishGate,
        approved_at: DateTime<Utc>,
    ) -> Result<(), ProfileStoreError> {
        self.inner.publish_calls.fetch_add(1, Ordering::SeqCst);

        let mut profiles = self.inner.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(&profile_id)
            .ok_or(ProfileStoreError::Conflict)?;

        if profile.admin_status != expected.admin_status
            || profile.publication_status != expected.publication_status
        {
            return Err(ProfileStoreError::Conflict);
        }

        profile.admin_status = AdminStatus::Approved;
        profile.publication_status = PublicationStatus::Public;
        profile.onboarding_stage = OnboardingStage::Live;
        profile.approved_at = Some(approved_at);
        profile.updated_at = approved_at;

        Ok(())
    }

    async fn submit_for_review(
        &self,
        profile_id: Uuid,
        submitted_at: DateTime<Utc>,
    ) -> Result<Profile, ProfileStoreError> {
        let mut profiles = self.inner.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(&profile_id)
            .ok_or(ProfileStoreError::ProfileNotFound)?;

        profile.admin_status = AdminStatus::PendingAdmin;
        profile.onboarding_stage = OnboardingStage::WaitingAdmin;
        profile.submitted_at = Some(submitted_at);

        Ok(profile.clone())
    }

    async fn set_stage(
        &self,
        profile_id: Uuid,
        stage: OnboardingStage,
    ) -> Result<(), ProfileStoreError> {
        let mut profiles = self.inner.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(&profile_id)
            .ok_or(ProfileStoreError::ProfileNotFound)?;

        profile.onboarding_stage = stage;
        Ok(())
    }
}

#[async_trait]
impl UserQuery for InMemoryStore {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserQueryResult>, UserQueryError> {
        Ok(self
            .inner
            .users
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|identity_status| UserQueryResult {
                id: user_id,
                identity_status: *identity_status,
                role: UserRole::User,
            }))
    }
}
