use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::onboarding::application::domain::entities::{
    RelationCounts, SubscriptionSnapshot, SubscriptionStatus,
};
use crate::modules::onboarding::application::ports::outgoing::profile_relations::{
    ProfileRelations, ProfileRelationsError,
};

use super::sea_orm_entity::media_assets::{
    Column as MediaColumn, Entity as MediaEntity,
};
use super::sea_orm_entity::profile_languages::{
    Column as LanguageColumn, Entity as LanguageEntity,
};
use super::sea_orm_entity::profile_rates::{Column as RateColumn, Entity as RateEntity};
use super::sea_orm_entity::profile_services::{
    Column as ServiceColumn, Entity as ServiceEntity,
};
use super::sea_orm_entity::profile_setups::{Column as SetupColumn, Entity as SetupEntity};
use super::sea_orm_entity::subscriptions::{
    Column as SubscriptionColumn, Entity as SubscriptionEntity,
};

#[derive(Clone, Debug)]
pub struct ProfileRelationsPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProfileRelationsPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRelations for ProfileRelationsPostgres {
    async fn counts_for(&self, profile_id: Uuid) -> Result<RelationCounts, ProfileRelationsError> {
        let db_err = |e: sea_orm::DbErr| ProfileRelationsError::DatabaseError(e.to_string());

        let approved_photos = MediaEntity::find()
            .filter(MediaColumn::ProfileId.eq(profile_id))
            .filter(MediaColumn::Status.eq("approved"))
            .count(&*self.db)
            .await
            .map_err(db_err)?;

        let languages = LanguageEntity::find()
            .filter(LanguageColumn::ProfileId.eq(profile_id))
            .count(&*self.db)
            .await
            .map_err(db_err)?;

        let services = ServiceEntity::find()
            .filter(ServiceColumn::ProfileId.eq(profile_id))
            .count(&*self.db)
            .await
            .map_err(db_err)?;

        let setups = SetupEntity::find()
            .filter(SetupColumn::ProfileId.eq(profile_id))
            .count(&*self.db)
            .await
            .map_err(db_err)?;

        let incall_rates = RateEntity::find()
            .filter(RateColumn::ProfileId.eq(profile_id))
            .filter(RateColumn::Context.eq("incall"))
            .filter(RateColumn::IsActive.eq(true))
            .count(&*self.db)
            .await
            .map_err(db_err)?;

        let outcall_rates = RateEntity::find()
            .filter(RateColumn::ProfileId.eq(profile_id))
            .filter(RateColumn::Context.eq("outcall"))
            .filter(RateColumn::IsActive.eq(true))
            .count(&*self.db)
            .await
            .map_err(db_err)?;

        Ok(RelationCounts {
            approved_photos,
            languages,
            services,
            setups,
            incall_rates,
            outcall_rates,
        })
    }

    async fn active_subscription(
        &self,
        user_id: Uuid,
    ) -> Result<Option<SubscriptionSnapshot>, ProfileRelationsError> {
        let model = SubscriptionEntity::find()
            .filter(SubscriptionColumn::UserId.eq(user_id))
            .filter(SubscriptionColumn::Status.is_in(["trialing", "active"]))
            .order_by_desc(SubscriptionColumn::CreatedAt)
            .one(&*self.db)
            .await
            .map_err(|e| ProfileRelationsError::DatabaseError(e.to_string()))?;

        model
            .map(|m| {
                Ok(SubscriptionSnapshot {
                    id: m.id,
                    plan: m.plan,
                    status: SubscriptionStatus::from_str(&m.status)
                        .map_err(ProfileRelationsError::DatabaseError)?,
                    trial_end: m.trial_end.map(|t| t.with_timezone(&chrono::Utc)),
                    current_period_end: m.current_period_end.with_timezone(&chrono::Utc),
                })
            })
            .transpose()
    }
}
