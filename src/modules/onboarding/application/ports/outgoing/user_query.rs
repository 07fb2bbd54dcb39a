// application/ports/outgoing/user_query.rs
use crate::modules::onboarding::application::domain::entities::{IdentityStatus, UserRole};
use async_trait::async_trait;
use uuid::Uuid;

/// Result DTO for user lookups. Only the fields the onboarding checks need.
#[derive(Debug, Clone)]
pub struct UserQueryResult {
    pub id: Uuid,
    pub identity_status: IdentityStatus,
    pub role: UserRole,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserQueryResult>, UserQueryError>;
}
