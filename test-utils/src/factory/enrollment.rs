//! Enrollment factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an active enrollment with no progress.
pub async fn create_enrollment(
    db: &DatabaseConnection,
    user_id: i32,
    course_id: i32,
) -> Result<entity::enrollment::Model, DbErr> {
    entity::enrollment::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        course_id: ActiveValue::Set(course_id),
        transaction_id: ActiveValue::Set(None),
        status: ActiveValue::Set("active".to_string()),
        progress_percent: ActiveValue::Set(0),
        enrolled_at: ActiveValue::Set(Utc::now()),
        completed_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
