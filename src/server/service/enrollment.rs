//! Course enrollments and learning progress.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::{course::CourseRepository, enrollment::EnrollmentRepository},
    error::AppError,
    model::{
        audit::AuditEntry,
        course::{Course, CourseStatus},
        enrollment::{Enrollment, EnrollmentStatus},
        user::User,
    },
    service::audit::AuditService,
};

pub struct EnrollmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EnrollmentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Enrolls the user in a free published course.
    ///
    /// A previously revoked or dropped enrollment is reactivated.
    ///
    /// # Returns
    /// - `Ok(Enrollment)` - Active enrollment
    /// - `Err(AppError::NotFound)` - Course missing or unpublished
    /// - `Err(AppError::BadRequest)` - Course is paid, or the user owns it
    /// - `Err(AppError::Conflict)` - Already actively enrolled
    pub async fn enroll_free(&self, user: &User, course_id: i32) -> Result<Enrollment, AppError> {
        let course = self.get_enrollable(user, course_id).await?;

        if !course.is_free() {
            return Err(AppError::BadRequest(
                "Paid courses require checkout".to_string(),
            ));
        }

        let enrollment = EnrollmentRepository::new(self.db)
            .activate(user.id, course_id, None)
            .await?;

        tracing::info!(user_id = user.id, course_id, "Enrolled in free course");

        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(user.id), "enrollment.create", "enrollment")
                    .entity_id(enrollment.id)
                    .details(json!({ "course_id": course_id })),
            )
            .await?;

        Ok(enrollment)
    }

    /// Grants access after a successful purchase.
    ///
    /// Idempotent: an already active enrollment is returned unchanged.
    pub async fn activate_purchase(
        &self,
        user_id: i32,
        course_id: i32,
        transaction_id: i32,
    ) -> Result<Enrollment, AppError> {
        let repo = EnrollmentRepository::new(self.db);

        if let Some(existing) = repo.find_by_user_and_course(user_id, course_id).await? {
            if existing.is_active() {
                return Ok(existing);
            }
        }

        let enrollment = repo
            .activate(user_id, course_id, Some(transaction_id))
            .await?;

        tracing::info!(user_id, course_id, transaction_id, "Enrollment activated by purchase");

        Ok(enrollment)
    }

    /// Checks that the user may start enrolling in the course, free or paid.
    ///
    /// # Returns
    /// - `Ok(Course)` - Published course the user does not own and is not enrolled in
    /// - `Err(AppError::NotFound)` - Course missing or unpublished
    /// - `Err(AppError::BadRequest)` - The user owns the course
    /// - `Err(AppError::Conflict)` - Already actively enrolled
    pub async fn get_enrollable(&self, user: &User, course_id: i32) -> Result<Course, AppError> {
        let course = CourseRepository::new(self.db)
            .find_by_id(course_id)
            .await?
            .filter(|c| c.status == CourseStatus::Published)
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if course.instructor_id == user.id {
            return Err(AppError::BadRequest(
                "You cannot enroll in your own course".to_string(),
            ));
        }

        let existing = EnrollmentRepository::new(self.db)
            .find_by_user_and_course(user.id, course_id)
            .await?;
        if existing.is_some_and(|e| e.is_active()) {
            return Err(AppError::Conflict(
                "Already enrolled in this course".to_string(),
            ));
        }

        Ok(course)
    }

    pub async fn list_mine(&self, user: &User) -> Result<Vec<Enrollment>, AppError> {
        Ok(EnrollmentRepository::new(self.db)
            .get_by_user(user.id)
            .await?)
    }

    /// Active enrollment of the user in a course.
    pub async fn get_progress(&self, user: &User, course_id: i32) -> Result<Enrollment, AppError> {
        self.get_active(user.id, course_id).await
    }

    /// Records progress through a course.
    ///
    /// Reaching 100 % stamps `completed_at` once; dropping below clears it.
    ///
    /// # Returns
    /// - `Ok(Enrollment)` - Updated enrollment
    /// - `Err(AppError::BadRequest)` - Progress outside `0..=100`
    /// - `Err(AppError::NotFound)` - No active enrollment
    pub async fn update_progress(
        &self,
        user: &User,
        course_id: i32,
        progress_percent: i32,
    ) -> Result<Enrollment, AppError> {
        if !(0..=100).contains(&progress_percent) {
            return Err(AppError::BadRequest(
                "Progress must be between 0 and 100".to_string(),
            ));
        }

        let enrollment = self.get_active(user.id, course_id).await?;

        let completed_at = if progress_percent == 100 {
            enrollment.completed_at.or_else(|| Some(Utc::now()))
        } else {
            None
        };

        EnrollmentRepository::new(self.db)
            .set_progress(enrollment.id, progress_percent, completed_at)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))
    }

    /// Leaves a course; the enrollment is kept as revoked.
    pub async fn unenroll(&self, user: &User, course_id: i32) -> Result<(), AppError> {
        let enrollment = self.get_active(user.id, course_id).await?;

        EnrollmentRepository::new(self.db)
            .set_status(enrollment.id, EnrollmentStatus::Revoked)
            .await?;

        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(user.id), "enrollment.unenroll", "enrollment")
                    .entity_id(enrollment.id)
                    .details(json!({ "course_id": course_id })),
            )
            .await?;

        Ok(())
    }

    /// Revokes access after a full refund. Missing or inactive enrollments are ignored.
    pub async fn revoke(&self, user_id: i32, course_id: i32) -> Result<(), AppError> {
        let repo = EnrollmentRepository::new(self.db);

        if let Some(enrollment) = repo.find_by_user_and_course(user_id, course_id).await? {
            if enrollment.is_active() {
                repo.set_status(enrollment.id, EnrollmentStatus::Revoked)
                    .await?;
                tracing::info!(user_id, course_id, "Enrollment revoked");
            }
        }

        Ok(())
    }

    async fn get_active(&self, user_id: i32, course_id: i32) -> Result<Enrollment, AppError> {
        EnrollmentRepository::new(self.db)
            .find_by_user_and_course(user_id, course_id)
            .await?
            .filter(|e| e.is_active())
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))
    }
}
