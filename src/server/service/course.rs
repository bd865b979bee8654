//! Course authoring and catalogue.
//!
//! Instructors create courses as drafts, build the curriculum and publish them. Published
//! courses are visible to everyone; drafts and archived courses only to their owner and to
//! admins. Every mutation writes an audit entry.

use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::{
        course::CourseRepository, curriculum::CurriculumRepository,
        difficulty::DifficultyRepository, enrollment::EnrollmentRepository,
        transaction::TransactionRepository,
    },
    error::AppError,
    model::{
        audit::AuditEntry,
        course::{Course, CourseFields, CourseFilter, CourseRecord, CourseStatus},
        pagination::{PageRequest, Paginated},
        user::User,
    },
    service::audit::AuditService,
    util::validation::{require_text, sanitize_text, slugify, validate_currency},
};

const TITLE_MAX_LEN: usize = 200;

pub struct CourseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CourseService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft course owned by `actor`.
    ///
    /// # Returns
    /// - `Ok(Course)` - The new draft
    /// - `Err(AppError::BadRequest)` - Invalid title, price, currency or unknown difficulty
    pub async fn create(&self, actor: &User, fields: CourseFields) -> Result<Course, AppError> {
        let validated = self.validate(fields).await?;
        let slug = self.unique_slug(&validated.title, None).await?;

        let course = CourseRepository::new(self.db)
            .create(CourseRecord {
                instructor_id: actor.id,
                title: validated.title,
                slug,
                description: validated.description,
                price_cents: validated.price_cents,
                currency: validated.currency,
                difficulty_id: validated.difficulty_id,
            })
            .await?;

        tracing::info!(course_id = course.id, instructor_id = actor.id, "Course created");

        self.audit(actor, "course.create", course.id, json!({ "title": course.title }))
            .await?;

        Ok(course)
    }

    /// Replaces the editable fields of a course.
    ///
    /// The slug is regenerated only when the title changes.
    ///
    /// # Returns
    /// - `Ok(Course)` - Updated course
    /// - `Err(AppError::NotFound)` - No such course
    /// - `Err(AppError::Forbidden)` - Caller is neither owner nor admin
    /// - `Err(AppError::BadRequest)` - Validation failed
    pub async fn update(
        &self,
        actor: &User,
        course_id: i32,
        fields: CourseFields,
    ) -> Result<Course, AppError> {
        let course = self.get_owned(actor, course_id).await?;
        let validated = self.validate(fields).await?;

        let slug = if validated.title == course.title {
            course.slug.clone()
        } else {
            self.unique_slug(&validated.title, Some(&course.slug)).await?
        };

        let updated = CourseRepository::new(self.db)
            .update(
                course_id,
                CourseRecord {
                    instructor_id: course.instructor_id,
                    title: validated.title,
                    slug,
                    description: validated.description,
                    price_cents: validated.price_cents,
                    currency: validated.currency,
                    difficulty_id: validated.difficulty_id,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        self.audit(actor, "course.update", course_id, json!({ "title": updated.title }))
            .await?;

        Ok(updated)
    }

    /// Deletes a course with its curriculum.
    ///
    /// # Returns
    /// - `Ok(())` - Course deleted
    /// - `Err(AppError::Conflict)` - The course has enrollments or transactions
    pub async fn delete(&self, actor: &User, course_id: i32) -> Result<(), AppError> {
        self.get_owned(actor, course_id).await?;

        if EnrollmentRepository::new(self.db)
            .count_by_course(course_id)
            .await?
            > 0
        {
            return Err(AppError::Conflict(
                "Course has enrollments and cannot be deleted".to_string(),
            ));
        }

        if TransactionRepository::new(self.db)
            .count_by_course(course_id)
            .await?
            > 0
        {
            return Err(AppError::Conflict(
                "Course has transactions and cannot be deleted".to_string(),
            ));
        }

        CourseRepository::new(self.db).delete(course_id).await?;

        tracing::info!(course_id, actor = actor.id, "Course deleted");

        self.audit(actor, "course.delete", course_id, json!({})).await?;

        Ok(())
    }

    /// Publishes a draft or archived course.
    ///
    /// # Returns
    /// - `Ok(Course)` - Published course with `published_at` set
    /// - `Err(AppError::BadRequest)` - Already published, or no section or lecture yet
    pub async fn publish(&self, actor: &User, course_id: i32) -> Result<Course, AppError> {
        let course = self.get_owned(actor, course_id).await?;

        if course.status == CourseStatus::Published {
            return Err(AppError::BadRequest("Course is already published".to_string()));
        }

        let (sections, lectures) = CurriculumRepository::new(self.db)
            .count_content(course_id)
            .await?;
        if sections == 0 || lectures == 0 {
            return Err(AppError::BadRequest(
                "Course needs at least one section and one lecture before publishing".to_string(),
            ));
        }

        let published = self.set_status(course_id, CourseStatus::Published).await?;

        tracing::info!(course_id, "Course published");

        self.audit(actor, "course.publish", course_id, json!({})).await?;

        Ok(published)
    }

    /// Archives a published course.
    ///
    /// # Returns
    /// - `Ok(Course)` - Archived course
    /// - `Err(AppError::BadRequest)` - Course is not published
    pub async fn archive(&self, actor: &User, course_id: i32) -> Result<Course, AppError> {
        let course = self.get_owned(actor, course_id).await?;

        if course.status != CourseStatus::Published {
            return Err(AppError::BadRequest(
                "Only published courses can be archived".to_string(),
            ));
        }

        let archived = self.set_status(course_id, CourseStatus::Archived).await?;

        tracing::info!(course_id, "Course archived");

        self.audit(actor, "course.archive", course_id, json!({})).await?;

        Ok(archived)
    }

    /// Gets a course as seen by `viewer`.
    ///
    /// Unpublished courses are reported as missing to anyone but their owner, admins and
    /// students with an active enrollment.
    pub async fn get(&self, viewer: Option<&User>, course_id: i32) -> Result<Course, AppError> {
        let course = CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if self.can_view(viewer, &course).await? {
            Ok(course)
        } else {
            Err(AppError::NotFound("Course not found".to_string()))
        }
    }

    pub async fn list_published(
        &self,
        filter: CourseFilter,
        page: PageRequest,
    ) -> Result<Paginated<Course>, AppError> {
        Ok(CourseRepository::new(self.db)
            .get_published_paginated(filter, page)
            .await?)
    }

    /// Every course of the instructor regardless of status.
    pub async fn list_own(&self, actor: &User) -> Result<Vec<Course>, AppError> {
        Ok(CourseRepository::new(self.db)
            .get_by_instructor(actor.id)
            .await?)
    }

    /// Loads a course the actor may modify.
    ///
    /// # Returns
    /// - `Ok(Course)` - Course owned by the actor, or any course for admins
    /// - `Err(AppError::NotFound)` - No such course
    /// - `Err(AppError::Forbidden)` - Actor is neither owner nor admin
    pub async fn get_owned(&self, actor: &User, course_id: i32) -> Result<Course, AppError> {
        let course = CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if course.instructor_id != actor.id && !actor.is_admin() {
            return Err(AppError::Forbidden(
                "Only the course owner can modify this course".to_string(),
            ));
        }

        Ok(course)
    }

    /// Whether the viewer may see the course and its full content.
    pub async fn has_full_access(
        &self,
        viewer: Option<&User>,
        course: &Course,
    ) -> Result<bool, AppError> {
        let Some(viewer) = viewer else {
            return Ok(false);
        };

        if viewer.is_admin() || viewer.id == course.instructor_id {
            return Ok(true);
        }

        let enrollment = EnrollmentRepository::new(self.db)
            .find_by_user_and_course(viewer.id, course.id)
            .await?;

        Ok(enrollment.is_some_and(|e| e.is_active()))
    }

    async fn can_view(&self, viewer: Option<&User>, course: &Course) -> Result<bool, AppError> {
        if course.status == CourseStatus::Published {
            return Ok(true);
        }

        self.has_full_access(viewer, course).await
    }

    async fn set_status(&self, course_id: i32, status: CourseStatus) -> Result<Course, AppError> {
        CourseRepository::new(self.db)
            .set_status(course_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }

    async fn validate(&self, fields: CourseFields) -> Result<ValidatedCourse, AppError> {
        let title = require_text("Title", &fields.title, 1, TITLE_MAX_LEN)?;
        let description = sanitize_text(&fields.description);

        if fields.price_cents < 0 {
            return Err(AppError::BadRequest("Price cannot be negative".to_string()));
        }

        let currency = validate_currency(fields.currency.as_deref())?;

        if let Some(difficulty_id) = fields.difficulty_id {
            if DifficultyRepository::new(self.db)
                .find_by_id(difficulty_id)
                .await?
                .is_none()
            {
                return Err(AppError::BadRequest(format!(
                    "Difficulty {} does not exist",
                    difficulty_id
                )));
            }
        }

        Ok(ValidatedCourse {
            title,
            description,
            price_cents: fields.price_cents,
            currency,
            difficulty_id: fields.difficulty_id,
        })
    }

    /// Slug of the title, suffixed with `-2`, `-3`, … until it is unused.
    ///
    /// `current` is the slug the course already holds; it counts as free.
    async fn unique_slug(&self, title: &str, current: Option<&str>) -> Result<String, AppError> {
        let repo = CourseRepository::new(self.db);

        let mut base = slugify(title);
        if base.is_empty() {
            base = "course".to_string();
        }

        let mut candidate = base.clone();
        let mut suffix = 2;
        while Some(candidate.as_str()) != current && repo.slug_exists(&candidate).await? {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }

        Ok(candidate)
    }

    async fn audit(
        &self,
        actor: &User,
        action: &str,
        course_id: i32,
        details: serde_json::Value,
    ) -> Result<(), AppError> {
        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(actor.id), action, "course")
                    .entity_id(course_id)
                    .details(details),
            )
            .await?;
        Ok(())
    }
}

struct ValidatedCourse {
    title: String,
    description: String,
    price_cents: i64,
    currency: String,
    difficulty_id: Option<i32>,
}
