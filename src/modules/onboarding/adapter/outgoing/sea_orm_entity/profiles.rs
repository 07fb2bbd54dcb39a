use sea_orm::entity::prelude::*;
use uuid::Uuid;

// Enum columns are stored as their snake_case tags; the adapters parse them
// into the domain enums on the way out.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub onboarding_stage: String,
    pub auto_moderation: String,
    pub admin_status: String,
    pub publication_status: String,
    pub display_name: Option<String>,
    pub city_slug: Option<String>,
    pub phone_public_e164: Option<String>,
    pub incall_enabled: bool,
    pub outcall_enabled: bool,
    pub admin_notes: Option<String>,
    pub submitted_at: Option<DateTimeWithTimeZone>,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        use chrono::Utc;
        use sea_orm::ActiveValue::Set;

        if !insert {
            // Only update updated_at on UPDATE, not INSERT
            self.updated_at = Set(Utc::now().into());
        }

        Ok(self)
    }
}
