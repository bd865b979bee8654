//! Section and lecture repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::course::{Lecture, LectureParams, Section};

pub struct CurriculumRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CurriculumRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a section after the last section of the course.
    pub async fn create_section(&self, course_id: i32, title: String) -> Result<Section, DbErr> {
        let position = entity::prelude::Section::find()
            .filter(entity::section::Column::CourseId.eq(course_id))
            .count(self.db)
            .await? as i32;

        let entity = entity::section::ActiveModel {
            course_id: ActiveValue::Set(course_id),
            title: ActiveValue::Set(title),
            position: ActiveValue::Set(position),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Section::from_entity(entity))
    }

    pub async fn find_section(&self, section_id: i32) -> Result<Option<Section>, DbErr> {
        Ok(entity::prelude::Section::find_by_id(section_id)
            .one(self.db)
            .await?
            .map(Section::from_entity))
    }

    pub async fn rename_section(
        &self,
        section_id: i32,
        title: String,
    ) -> Result<Option<Section>, DbErr> {
        let Some(existing) = entity::prelude::Section::find_by_id(section_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::section::ActiveModel = existing.into();
        active.title = ActiveValue::Set(title);

        Ok(Some(Section::from_entity(active.update(self.db).await?)))
    }

    /// Deletes a section and all of its lectures.
    pub async fn delete_section(&self, section_id: i32) -> Result<(), DbErr> {
        entity::prelude::Lecture::delete_many()
            .filter(entity::lecture::Column::SectionId.eq(section_id))
            .exec(self.db)
            .await?;

        entity::prelude::Section::delete_by_id(section_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Sections of a course ordered by position.
    pub async fn get_sections(&self, course_id: i32) -> Result<Vec<Section>, DbErr> {
        Ok(entity::prelude::Section::find()
            .filter(entity::section::Column::CourseId.eq(course_id))
            .order_by_asc(entity::section::Column::Position)
            .order_by_asc(entity::section::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Section::from_entity)
            .collect())
    }

    /// Sets the position of each section to its index in `section_ids`.
    pub async fn set_section_positions(&self, section_ids: &[i32]) -> Result<(), DbErr> {
        for (position, section_id) in section_ids.iter().enumerate() {
            entity::prelude::Section::update_many()
                .filter(entity::section::Column::Id.eq(*section_id))
                .col_expr(
                    entity::section::Column::Position,
                    sea_orm::sea_query::Expr::value(position as i32),
                )
                .exec(self.db)
                .await?;
        }

        Ok(())
    }

    pub async fn create_lecture(
        &self,
        section_id: i32,
        params: LectureParams,
    ) -> Result<Lecture, DbErr> {
        let position = match params.position {
            Some(position) => position,
            None => {
                entity::prelude::Lecture::find()
                    .filter(entity::lecture::Column::SectionId.eq(section_id))
                    .count(self.db)
                    .await? as i32
            }
        };

        let entity = entity::lecture::ActiveModel {
            section_id: ActiveValue::Set(section_id),
            title: ActiveValue::Set(params.title),
            content: ActiveValue::Set(params.content),
            video_upload_id: ActiveValue::Set(params.video_upload_id),
            duration_seconds: ActiveValue::Set(params.duration_seconds),
            position: ActiveValue::Set(position),
            is_preview: ActiveValue::Set(params.is_preview),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Lecture::from_entity(entity))
    }

    pub async fn find_lecture(&self, lecture_id: i32) -> Result<Option<Lecture>, DbErr> {
        Ok(entity::prelude::Lecture::find_by_id(lecture_id)
            .one(self.db)
            .await?
            .map(Lecture::from_entity))
    }

    /// Overwrites a lecture; a `None` position keeps the current one.
    pub async fn update_lecture(
        &self,
        lecture_id: i32,
        params: LectureParams,
    ) -> Result<Option<Lecture>, DbErr> {
        let Some(existing) = entity::prelude::Lecture::find_by_id(lecture_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::lecture::ActiveModel = existing.into();
        active.title = ActiveValue::Set(params.title);
        active.content = ActiveValue::Set(params.content);
        active.video_upload_id = ActiveValue::Set(params.video_upload_id);
        active.duration_seconds = ActiveValue::Set(params.duration_seconds);
        active.is_preview = ActiveValue::Set(params.is_preview);
        if let Some(position) = params.position {
            active.position = ActiveValue::Set(position);
        }

        Ok(Some(Lecture::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete_lecture(&self, lecture_id: i32) -> Result<(), DbErr> {
        entity::prelude::Lecture::delete_by_id(lecture_id)
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Lectures of the given sections ordered by section, then position.
    pub async fn get_lectures(&self, section_ids: Vec<i32>) -> Result<Vec<Lecture>, DbErr> {
        if section_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(entity::prelude::Lecture::find()
            .filter(entity::lecture::Column::SectionId.is_in(section_ids))
            .order_by_asc(entity::lecture::Column::SectionId)
            .order_by_asc(entity::lecture::Column::Position)
            .order_by_asc(entity::lecture::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Lecture::from_entity)
            .collect())
    }

    /// Counts sections and lectures of a course.
    ///
    /// # Returns
    /// - `Ok((sections, lectures))` - Counts used to decide whether a course may be published
    /// - `Err(DbErr)` - Database error
    pub async fn count_content(&self, course_id: i32) -> Result<(u64, u64), DbErr> {
        let sections = self.get_sections(course_id).await?;
        let section_ids: Vec<i32> = sections.iter().map(|s| s.id).collect();

        let lectures = if section_ids.is_empty() {
            0
        } else {
            entity::prelude::Lecture::find()
                .filter(entity::lecture::Column::SectionId.is_in(section_ids))
                .count(self.db)
                .await?
        };

        Ok((sections.len() as u64, lectures))
    }
}
