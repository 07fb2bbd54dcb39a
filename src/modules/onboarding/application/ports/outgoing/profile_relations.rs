use crate::modules::onboarding::application::domain::entities::{
    RelationCounts, SubscriptionSnapshot,
};
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfileRelationsError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Read side for the submission checklist: relation counts plus the latest
/// usable subscription, both owned by other flows.
#[async_trait]
pub trait ProfileRelations: Send + Sync {
    async fn counts_for(&self, profile_id: Uuid) -> Result<RelationCounts, ProfileRelationsError>;

    async fn active_subscription(
        &self,
        user_id: Uuid,
    ) -> Result<Option<SubscriptionSnapshot>, ProfileRelationsError>;
}
