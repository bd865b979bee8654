use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User, m20260105_000003_create_course_table::Course,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transaction::Table)
                    .if_not_exists()
                    .col(pk_auto(Transaction::Id))
                    .col(integer(Transaction::UserId))
                    .col(integer(Transaction::CourseId))
                    .col(big_integer(Transaction::AmountCents))
                    .col(big_integer(Transaction::RefundAmountCents).default(0))
                    .col(string(Transaction::Currency))
                    .col(string(Transaction::Status).default("pending"))
                    .col(string_null(Transaction::PaymentIntentId).unique_key())
                    .col(string_null(Transaction::RefundReason))
                    .col(
                        timestamp_with_time_zone(Transaction::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Transaction::CompletedAt))
                    .col(timestamp_with_time_zone_null(Transaction::RefundedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_user_id")
                            .from(Transaction::Table, Transaction::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_course_id")
                            .from(Transaction::Table, Transaction::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_status_completed_at")
                    .table(Transaction::Table)
                    .col(Transaction::Status)
                    .col(Transaction::CompletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Transaction {
    Table,
    Id,
    UserId,
    CourseId,
    AmountCents,
    RefundAmountCents,
    Currency,
    Status,
    PaymentIntentId,
    RefundReason,
    CreatedAt,
    CompletedAt,
    RefundedAt,
}
