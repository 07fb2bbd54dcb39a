pub mod profile_relations;
pub mod profile_store;
pub mod user_query;

pub use profile_relations::ProfileRelations;
pub use profile_store::{ProfileStore, ProfileStoreError};
pub use user_query::UserQuery;
