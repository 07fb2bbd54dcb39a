use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Profiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Profiles::OnboardingStage)
                            .string_len(20)
                            .not_null()
                            .default("start"),
                    )
                    .col(
                        ColumnDef::new(Profiles::AutoModeration)
                            .string_len(20)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(Profiles::AdminStatus)
                            .string_len(20)
                            .not_null()
                            .default("pending_admin"),
                    )
                    .col(
                        ColumnDef::new(Profiles::PublicationStatus)
                            .string_len(10)
                            .not_null()
                            .default("private"),
                    )
                    .col(ColumnDef::new(Profiles::DisplayName).string_len(100))
                    .col(ColumnDef::new(Profiles::CitySlug).string_len(100))
                    .col(ColumnDef::new(Profiles::PhonePublicE164).string_len(20))
                    .col(
                        ColumnDef::new(Profiles::IncallEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Profiles::OutcallEnabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Profiles::AdminNotes).text())
                    .col(ColumnDef::new(Profiles::SubmittedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Profiles::ApprovedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Profiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profiles_user_id")
                            .from(Profiles::Table, Profiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================
        // PERFORMANCE INDEXES
        // ============================================

        // 1. Partial index serving the duplicate display-name check:
        //    only published, admin-approved rows participate
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_profiles_display_name_published
                ON profiles (display_name)
                WHERE publication_status = 'public' AND admin_status = 'approved';
                "#,
            )
            .await?;

        // 2. Admin queue lookups
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_profiles_admin_status
                ON profiles (admin_status, submitted_at);
                "#,
            )
            .await?;

        // 3. Directory listing scans
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_profiles_publication_status
                ON profiles (publication_status, city_slug);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
    UserId,
    OnboardingStage,
    AutoModeration,
    AdminStatus,
    PublicationStatus,
    DisplayName,
    CitySlug,
    PhonePublicE164,
    IncallEnabled,
    OutcallEnabled,
    AdminNotes,
    SubmittedAt,
    ApprovedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
