use sea_orm_migration::{prelude::*, schema::*};

use super::{m20260105_000003_create_course_table::Course, m20260106_000007_create_tag_table::Tag};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseTag::Table)
                    .if_not_exists()
                    .col(integer(CourseTag::CourseId))
                    .col(integer(CourseTag::TagId))
                    .primary_key(
                        Index::create()
                            .col(CourseTag::CourseId)
                            .col(CourseTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_tag_course_id")
                            .from(CourseTag::Table, CourseTag::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_tag_tag_id")
                            .from(CourseTag::Table, CourseTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseTag::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CourseTag {
    Table,
    CourseId,
    TagId,
}
