use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LegalDocument::Table)
                    .if_not_exists()
                    .col(pk_auto(LegalDocument::Id))
                    .col(string(LegalDocument::DocumentType))
                    .col(string(LegalDocument::Version))
                    .col(string(LegalDocument::Title))
                    .col(text(LegalDocument::Content))
                    .col(boolean(LegalDocument::IsActive).default(false))
                    .col(
                        timestamp_with_time_zone(LegalDocument::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(LegalDocument::ActivatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_legal_document_type_version")
                    .table(LegalDocument::Table)
                    .col(LegalDocument::DocumentType)
                    .col(LegalDocument::Version)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LegalDocument::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum LegalDocument {
    Table,
    Id,
    DocumentType,
    Version,
    Title,
    Content,
    IsActive,
    CreatedAt,
    ActivatedAt,
}
