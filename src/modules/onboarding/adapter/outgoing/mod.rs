pub mod profile_relations_postgres;
pub mod profile_store_postgres;
pub mod sea_orm_entity;
pub mod user_query_postgres;
