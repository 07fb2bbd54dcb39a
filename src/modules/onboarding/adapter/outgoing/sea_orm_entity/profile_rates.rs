use sea_orm::entity::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profile_rates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub profile_id: Uuid,
    pub context: String,
    pub duration_minutes: i32,
    pub price_cents: i32,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
