//! Course repository.
//!
//! Courses are always returned together with their tags, loaded in one extra query per
//! call rather than per course.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::model::{
    course::{Course, CourseFilter, CourseRecord, CourseStatus},
    pagination::{PageRequest, Paginated},
};

pub struct CourseRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CourseRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new draft course.
    pub async fn create(&self, record: CourseRecord) -> Result<Course, DbErr> {
        let now = Utc::now();

        let entity = entity::course::ActiveModel {
            instructor_id: ActiveValue::Set(record.instructor_id),
            title: ActiveValue::Set(record.title),
            slug: ActiveValue::Set(record.slug),
            description: ActiveValue::Set(record.description),
            price_cents: ActiveValue::Set(record.price_cents),
            currency: ActiveValue::Set(record.currency),
            difficulty_id: ActiveValue::Set(record.difficulty_id),
            status: ActiveValue::Set(CourseStatus::Draft.as_str().to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            published_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Course::from_entity(entity, Vec::new())
    }

    /// Gets a course by id with its tags.
    pub async fn find_by_id(&self, course_id: i32) -> Result<Option<Course>, DbErr> {
        let Some(entity) = entity::prelude::Course::find_by_id(course_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut courses = self.attach_tags(vec![entity]).await?;
        Ok(courses.pop())
    }

    /// Gets several courses by id, keyed by id.
    pub async fn find_by_ids(&self, course_ids: Vec<i32>) -> Result<HashMap<i32, Course>, DbErr> {
        if course_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let entities = entity::prelude::Course::find()
            .filter(entity::course::Column::Id.is_in(course_ids))
            .all(self.db)
            .await?;

        Ok(self
            .attach_tags(entities)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect())
    }

    /// Returns whether a course already uses `slug`.
    pub async fn slug_exists(&self, slug: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Course::find()
            .filter(entity::course::Column::Slug.eq(slug))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Overwrites the editable fields of a course.
    ///
    /// # Returns
    /// - `Ok(Some(Course))` - Updated course
    /// - `Ok(None)` - Course does not exist
    /// - `Err(DbErr)` - Database error
    pub async fn update(&self, course_id: i32, record: CourseRecord) -> Result<Option<Course>, DbErr> {
        let Some(existing) = entity::prelude::Course::find_by_id(course_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::course::ActiveModel = existing.into();
        active.title = ActiveValue::Set(record.title);
        active.slug = ActiveValue::Set(record.slug);
        active.description = ActiveValue::Set(record.description);
        active.price_cents = ActiveValue::Set(record.price_cents);
        active.currency = ActiveValue::Set(record.currency);
        active.difficulty_id = ActiveValue::Set(record.difficulty_id);
        active.updated_at = ActiveValue::Set(Utc::now());
        let updated = active.update(self.db).await?;

        let mut courses = self.attach_tags(vec![updated]).await?;
        Ok(courses.pop())
    }

    /// Changes the status of a course, stamping `published_at` when publishing.
    pub async fn set_status(
        &self,
        course_id: i32,
        status: CourseStatus,
    ) -> Result<Option<Course>, DbErr> {
        let Some(existing) = entity::prelude::Course::find_by_id(course_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let now = Utc::now();
        let mut active: entity::course::ActiveModel = existing.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.updated_at = ActiveValue::Set(now);
        if status == CourseStatus::Published {
            active.published_at = ActiveValue::Set(Some(now));
        }
        let updated = active.update(self.db).await?;

        let mut courses = self.attach_tags(vec![updated]).await?;
        Ok(courses.pop())
    }

    /// Deletes a course together with its curriculum and tag links.
    pub async fn delete(&self, course_id: i32) -> Result<(), DbErr> {
        let section_ids: Vec<i32> = entity::prelude::Section::find()
            .select_only()
            .column(entity::section::Column::Id)
            .filter(entity::section::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(self.db)
            .await?;

        if !section_ids.is_empty() {
            entity::prelude::Lecture::delete_many()
                .filter(entity::lecture::Column::SectionId.is_in(section_ids))
                .exec(self.db)
                .await?;
        }

        entity::prelude::Section::delete_many()
            .filter(entity::section::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await?;

        entity::prelude::CourseTag::delete_many()
            .filter(entity::course_tag::Column::CourseId.eq(course_id))
            .exec(self.db)
            .await?;

        entity::prelude::Course::delete_by_id(course_id)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Lists published courses, newest first, with optional filters.
    ///
    /// # Arguments
    /// - `filter` - Tag slug, difficulty and instructor filters; all optional
    /// - `page` - Zero-indexed page request
    ///
    /// # Returns
    /// - `Ok(Paginated<Course>)` - Matching courses for the page and the total count
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_published_paginated(
        &self,
        filter: CourseFilter,
        page: PageRequest,
    ) -> Result<Paginated<Course>, DbErr> {
        let mut query = entity::prelude::Course::find()
            .filter(entity::course::Column::Status.eq(CourseStatus::Published.as_str()));

        if let Some(difficulty_id) = filter.difficulty_id {
            query = query.filter(entity::course::Column::DifficultyId.eq(difficulty_id));
        }

        if let Some(instructor_id) = filter.instructor_id {
            query = query.filter(entity::course::Column::InstructorId.eq(instructor_id));
        }

        if let Some(tag_slug) = filter.tag_slug {
            let Some(tag) = entity::prelude::Tag::find()
                .filter(entity::tag::Column::Slug.eq(tag_slug))
                .one(self.db)
                .await?
            else {
                return Ok(Paginated::new(Vec::new(), 0, page.page, page.per_page));
            };

            let course_ids: Vec<i32> = entity::prelude::CourseTag::find()
                .select_only()
                .column(entity::course_tag::Column::CourseId)
                .filter(entity::course_tag::Column::TagId.eq(tag.id))
                .into_tuple()
                .all(self.db)
                .await?;

            query = query.filter(entity::course::Column::Id.is_in(course_ids));
        }

        let paginator = query
            .order_by_desc(entity::course::Column::PublishedAt)
            .order_by_desc(entity::course::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.page).await?;
        let courses = self.attach_tags(entities).await?;

        Ok(Paginated::new(courses, total, page.page, page.per_page))
    }

    /// Lists every course of an instructor regardless of status, newest first.
    pub async fn get_by_instructor(&self, instructor_id: i32) -> Result<Vec<Course>, DbErr> {
        let entities = entity::prelude::Course::find()
            .filter(entity::course::Column::InstructorId.eq(instructor_id))
            .order_by_desc(entity::course::Column::CreatedAt)
            .order_by_desc(entity::course::Column::Id)
            .all(self.db)
            .await?;

        self.attach_tags(entities).await
    }

    /// Ids of every course owned by the instructor.
    pub async fn get_ids_by_instructor(&self, instructor_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Course::find()
            .select_only()
            .column(entity::course::Column::Id)
            .filter(entity::course::Column::InstructorId.eq(instructor_id))
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Counts courses that use a difficulty level.
    pub async fn count_by_difficulty(&self, difficulty_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Course::find()
            .filter(entity::course::Column::DifficultyId.eq(difficulty_id))
            .count(self.db)
            .await
    }

    /// Loads the tags of each course and converts them to domain models.
    async fn attach_tags(&self, entities: Vec<entity::course::Model>) -> Result<Vec<Course>, DbErr> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: Vec<i32> = entities.iter().map(|c| c.id).collect();
        let links = entity::prelude::CourseTag::find()
            .filter(entity::course_tag::Column::CourseId.is_in(course_ids))
            .all(self.db)
            .await?;

        let tag_ids: Vec<i32> = links.iter().map(|l| l.tag_id).collect();
        let tags: HashMap<i32, entity::tag::Model> = if tag_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::Tag::find()
                .filter(entity::tag::Column::Id.is_in(tag_ids))
                .all(self.db)
                .await?
                .into_iter()
                .map(|t| (t.id, t))
                .collect()
        };

        let mut tags_by_course: HashMap<i32, Vec<entity::tag::Model>> = HashMap::new();
        for link in links {
            if let Some(tag) = tags.get(&link.tag_id) {
                tags_by_course
                    .entry(link.course_id)
                    .or_default()
                    .push(tag.clone());
            }
        }

        entities
            .into_iter()
            .map(|course| {
                let mut course_tags = tags_by_course.remove(&course.id).unwrap_or_default();
                course_tags.sort_by(|a, b| a.name.cmp(&b.name));
                Course::from_entity(course, course_tags)
            })
            .collect()
    }
}
