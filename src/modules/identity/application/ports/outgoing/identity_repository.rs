use crate::modules::onboarding::application::domain::entities::IdentityStatus;
use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

#[async_trait]
pub trait IdentityRepository: Send + Sync {
    async fn set_identity_status(
        &self,
        user_id: Uuid,
        status: IdentityStatus,
    ) -> Result<(), IdentityRepositoryError>;
}

#[derive(Debug)]
pub enum IdentityRepositoryError {
    UserNotFound,
    DatabaseError(String),
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for IdentityRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityRepositoryError::UserNotFound => write!(f, "User not found"),
            IdentityRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}
