use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User,
    m20260105_000002_create_difficulty_configuration_table::DifficultyConfiguration,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(pk_auto(Course::Id))
                    .col(integer(Course::InstructorId))
                    .col(string(Course::Title))
                    .col(string_uniq(Course::Slug))
                    .col(text(Course::Description))
                    .col(big_integer(Course::PriceCents).default(0))
                    .col(string(Course::Currency).default("usd"))
                    .col(integer_null(Course::DifficultyId))
                    .col(string(Course::Status).default("draft"))
                    .col(
                        timestamp_with_time_zone(Course::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Course::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Course::PublishedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_instructor_id")
                            .from(Course::Table, Course::InstructorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_difficulty_id")
                            .from(Course::Table, Course::DifficultyId)
                            .to(DifficultyConfiguration::Table, DifficultyConfiguration::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_status")
                    .table(Course::Table)
                    .col(Course::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Course {
    Table,
    Id,
    InstructorId,
    Title,
    Slug,
    Description,
    PriceCents,
    Currency,
    DifficultyId,
    Status,
    CreatedAt,
    UpdatedAt,
    PublishedAt,
}
