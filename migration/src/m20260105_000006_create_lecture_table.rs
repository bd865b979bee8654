use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000004_create_section_table::Section, m20260105_000005_create_upload_table::Upload,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lecture::Table)
                    .if_not_exists()
                    .col(pk_auto(Lecture::Id))
                    .col(integer(Lecture::SectionId))
                    .col(string(Lecture::Title))
                    .col(text_null(Lecture::Content))
                    .col(string_null(Lecture::VideoUploadId))
                    .col(integer(Lecture::DurationSeconds).default(0))
                    .col(integer(Lecture::Position).default(0))
                    .col(boolean(Lecture::IsPreview).default(false))
                    .col(
                        timestamp_with_time_zone(Lecture::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lecture_section_id")
                            .from(Lecture::Table, Lecture::SectionId)
                            .to(Section::Table, Section::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lecture_video_upload_id")
                            .from(Lecture::Table, Lecture::VideoUploadId)
                            .to(Upload::Table, Upload::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lecture::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Lecture {
    Table,
    Id,
    SectionId,
    Title,
    Content,
    VideoUploadId,
    DurationSeconds,
    Position,
    IsPreview,
    CreatedAt,
}
