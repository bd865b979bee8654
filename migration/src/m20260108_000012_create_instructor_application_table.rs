use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InstructorApplication::Table)
                    .if_not_exists()
                    .col(pk_auto(InstructorApplication::Id))
                    .col(integer(InstructorApplication::UserId))
                    .col(text(InstructorApplication::Bio))
                    .col(string(InstructorApplication::Expertise))
                    .col(string_null(InstructorApplication::Website))
                    .col(string(InstructorApplication::Status).default("pending"))
                    .col(string_null(InstructorApplication::RejectionReason))
                    .col(integer_null(InstructorApplication::ReviewedBy))
                    .col(
                        timestamp_with_time_zone(InstructorApplication::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(InstructorApplication::ReviewedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_instructor_application_user_id")
                            .from(InstructorApplication::Table, InstructorApplication::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(InstructorApplication::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum InstructorApplication {
    Table,
    Id,
    UserId,
    Bio,
    Expertise,
    Website,
    Status,
    RejectionReason,
    ReviewedBy,
    CreatedAt,
    ReviewedAt,
}
