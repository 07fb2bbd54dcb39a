pub mod moderation_repository;

pub use moderation_repository::{ModerationRepository, ModerationRepositoryError};
