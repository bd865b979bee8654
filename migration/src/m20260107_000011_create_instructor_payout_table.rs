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
                    .table(InstructorPayout::Table)
                    .if_not_exists()
                    .col(pk_auto(InstructorPayout::Id))
                    .col(integer(InstructorPayout::InstructorId))
                    .col(big_integer(InstructorPayout::AmountCents))
                    .col(string(InstructorPayout::Currency))
                    .col(integer(InstructorPayout::CommissionRateBps))
                    .col(date(InstructorPayout::PeriodStart))
                    .col(date(InstructorPayout::PeriodEnd))
                    .col(string(InstructorPayout::Status).default("pending"))
                    .col(string_null(InstructorPayout::ExternalReference))
                    .col(string_null(InstructorPayout::FailureReason))
                    .col(
                        timestamp_with_time_zone(InstructorPayout::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(InstructorPayout::PaidAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_instructor_payout_instructor_id")
                            .from(InstructorPayout::Table, InstructorPayout::InstructorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InstructorPayout::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InstructorPayout {
    Table,
    Id,
    InstructorId,
    AmountCents,
    Currency,
    CommissionRateBps,
    PeriodStart,
    PeriodEnd,
    Status,
    ExternalReference,
    FailureReason,
    CreatedAt,
    PaidAt,
}
