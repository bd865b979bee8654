use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SecurityEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(SecurityEvent::Id))
                    .col(string(SecurityEvent::EventType))
                    .col(string(SecurityEvent::Severity))
                    .col(integer_null(SecurityEvent::UserId))
                    .col(string_null(SecurityEvent::IpAddress))
                    .col(text_null(SecurityEvent::Details))
                    .col(
                        timestamp_with_time_zone(SecurityEvent::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SecurityEvent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SecurityEvent {
    Table,
    Id,
    EventType,
    Severity,
    UserId,
    IpAddress,
    Details,
    CreatedAt,
}
