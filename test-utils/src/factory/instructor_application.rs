//! Instructor application factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an application for the user with the given status.
pub async fn create_application(
    db: &DatabaseConnection,
    user_id: i32,
    status: &str,
) -> Result<entity::instructor_application::Model, DbErr> {
    entity::instructor_application::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        bio: ActiveValue::Set("Ten years of teaching".to_string()),
        expertise: ActiveValue::Set("Rust".to_string()),
        website: ActiveValue::Set(None),
        status: ActiveValue::Set(status.to_string()),
        rejection_reason: ActiveValue::Set(None),
        reviewed_by: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        reviewed_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
