//! Enrollment repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::enrollment::{Enrollment, EnrollmentStatus};

pub struct EnrollmentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EnrollmentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the enrollment of a user in a course regardless of its status.
    pub async fn find_by_user_and_course(
        &self,
        user_id: i32,
        course_id: i32,
    ) -> Result<Option<Enrollment>, DbErr> {
        entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::UserId.eq(user_id))
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .one(self.db)
            .await?
            .map(Enrollment::from_entity)
            .transpose()
    }

    /// Creates an active enrollment, or reactivates an existing one.
    ///
    /// A reactivated enrollment keeps its progress but points at the new transaction.
    ///
    /// # Arguments
    /// - `user_id` - Student being enrolled
    /// - `course_id` - Course to enroll in
    /// - `transaction_id` - Purchase granting access, `None` for free courses
    ///
    /// # Returns
    /// - `Ok(Enrollment)` - The active enrollment
    /// - `Err(DbErr)` - Database error
    pub async fn activate(
        &self,
        user_id: i32,
        course_id: i32,
        transaction_id: Option<i32>,
    ) -> Result<Enrollment, DbErr> {
        let existing = entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::UserId.eq(user_id))
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .one(self.db)
            .await?;

        let entity = match existing {
            Some(existing) => {
                let mut active: entity::enrollment::ActiveModel = existing.into();
                active.status = ActiveValue::Set(EnrollmentStatus::Active.as_str().to_string());
                active.transaction_id = ActiveValue::Set(transaction_id);
                active.enrolled_at = ActiveValue::Set(Utc::now());
                active.update(self.db).await?
            }
            None => {
                entity::enrollment::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    course_id: ActiveValue::Set(course_id),
                    transaction_id: ActiveValue::Set(transaction_id),
                    status: ActiveValue::Set(EnrollmentStatus::Active.as_str().to_string()),
                    progress_percent: ActiveValue::Set(0),
                    enrolled_at: ActiveValue::Set(Utc::now()),
                    completed_at: ActiveValue::Set(None),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        Enrollment::from_entity(entity)
    }

    pub async fn set_status(
        &self,
        enrollment_id: i32,
        status: EnrollmentStatus,
    ) -> Result<Option<Enrollment>, DbErr> {
        let Some(existing) = entity::prelude::Enrollment::find_by_id(enrollment_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::enrollment::ActiveModel = existing.into();
        active.status = ActiveValue::Set(status.as_str().to_string());

        Enrollment::from_entity(active.update(self.db).await?).map(Some)
    }

    pub async fn set_progress(
        &self,
        enrollment_id: i32,
        progress_percent: i32,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Enrollment>, DbErr> {
        let Some(existing) = entity::prelude::Enrollment::find_by_id(enrollment_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::enrollment::ActiveModel = existing.into();
        active.progress_percent = ActiveValue::Set(progress_percent);
        active.completed_at = ActiveValue::Set(completed_at);

        Enrollment::from_entity(active.update(self.db).await?).map(Some)
    }

    /// All enrollments of a user, newest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Enrollment>, DbErr> {
        entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::UserId.eq(user_id))
            .order_by_desc(entity::enrollment::Column::EnrolledAt)
            .all(self.db)
            .await?
            .into_iter()
            .map(Enrollment::from_entity)
            .collect()
    }

    /// Counts enrollments of a course of any status.
    pub async fn count_by_course(&self, course_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Enrollment::find()
            .filter(entity::enrollment::Column::CourseId.eq(course_id))
            .count(self.db)
            .await
    }
}
