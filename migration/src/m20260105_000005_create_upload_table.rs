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
                    .table(Upload::Table)
                    .if_not_exists()
                    .col(string(Upload::Id).primary_key())
                    .col(integer(Upload::UserId))
                    .col(string(Upload::Filename))
                    .col(big_integer(Upload::TotalSize))
                    .col(big_integer(Upload::ChunkSize))
                    .col(integer(Upload::TotalChunks))
                    .col(string(Upload::Sha256))
                    .col(string(Upload::Status).default("in_progress"))
                    .col(string_null(Upload::StoredPath))
                    .col(
                        timestamp_with_time_zone(Upload::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Upload::CompletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_upload_user_id")
                            .from(Upload::Table, Upload::UserId)
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
            .drop_table(Table::drop().table(Upload::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Upload {
    Table,
    Id,
    UserId,
    Filename,
    TotalSize,
    ChunkSize,
    TotalChunks,
    Sha256,
    Status,
    StoredPath,
    CreatedAt,
    CompletedAt,
}
