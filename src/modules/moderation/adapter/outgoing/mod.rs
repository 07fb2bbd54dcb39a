pub mod moderation_repository_postgres;
