use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DifficultyConfiguration::Table)
                    .if_not_exists()
                    .col(pk_auto(DifficultyConfiguration::Id))
                    .col(string_uniq(DifficultyConfiguration::Level))
                    .col(string(DifficultyConfiguration::DisplayName))
                    .col(integer(DifficultyConfiguration::SortOrder).default(0))
                    .col(text_null(DifficultyConfiguration::Description))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(DifficultyConfiguration::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum DifficultyConfiguration {
    Table,
    Id,
    Level,
    DisplayName,
    SortOrder,
    Description,
}
