pub mod ingest_moderation_result;
