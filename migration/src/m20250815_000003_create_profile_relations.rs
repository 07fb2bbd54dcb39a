use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MediaAssets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MediaAssets::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MediaAssets::ProfileId).uuid().not_null())
                    .col(
                        ColumnDef::new(MediaAssets::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(MediaAssets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_media_assets_profile_id")
                            .from(MediaAssets::Table, MediaAssets::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProfileLanguages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProfileLanguages::ProfileId).uuid().not_null())
                    .col(
                        ColumnDef::new(ProfileLanguages::LanguageCode)
                            .string_len(10)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProfileLanguages::ProfileId)
                            .col(ProfileLanguages::LanguageCode),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_languages_profile_id")
                            .from(ProfileLanguages::Table, ProfileLanguages::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProfileServices::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProfileServices::ProfileId).uuid().not_null())
                    .col(
                        ColumnDef::new(ProfileServices::ServiceSlug)
                            .string_len(100)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProfileServices::ProfileId)
                            .col(ProfileServices::ServiceSlug),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_services_profile_id")
                            .from(ProfileServices::Table, ProfileServices::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProfileSetups::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProfileSetups::ProfileId).uuid().not_null())
                    .col(
                        ColumnDef::new(ProfileSetups::SetupSlug)
                            .string_len(100)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProfileSetups::ProfileId)
                            .col(ProfileSetups::SetupSlug),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_setups_profile_id")
                            .from(ProfileSetups::Table, ProfileSetups::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProfileRates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProfileRates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProfileRates::ProfileId).uuid().not_null())
                    .col(
                        ColumnDef::new(ProfileRates::Context)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProfileRates::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProfileRates::PriceCents).integer().not_null())
                    .col(
                        ColumnDef::new(ProfileRates::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_rates_profile_id")
                            .from(ProfileRates::Table, ProfileRates::ProfileId)
                            .to(Profiles::Table, Profiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Submission-checklist count queries filter on these
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_media_assets_profile_status
                ON media_assets (profile_id, status);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_profile_rates_profile_context
                ON profile_rates (profile_id, context)
                WHERE is_active = true;
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProfileRates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProfileSetups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProfileServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProfileLanguages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MediaAssets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MediaAssets {
    Table,
    Id,
    ProfileId,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum ProfileLanguages {
    Table,
    ProfileId,
    LanguageCode,
}

#[derive(Iden)]
enum ProfileServices {
    Table,
    ProfileId,
    ServiceSlug,
}

#[derive(Iden)]
enum ProfileSetups {
    Table,
    ProfileId,
    SetupSlug,
}

#[derive(Iden)]
enum ProfileRates {
    Table,
    Id,
    ProfileId,
    Context,
    DurationMinutes,
    PriceCents,
    IsActive,
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
}
