//! Section and lecture factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a section at position 0.
pub async fn create_section(
    db: &DatabaseConnection,
    course_id: i32,
) -> Result<entity::section::Model, DbErr> {
    entity::section::ActiveModel {
        course_id: ActiveValue::Set(course_id),
        title: ActiveValue::Set(format!("Section {}", next_id())),
        position: ActiveValue::Set(0),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a non-preview text lecture at position 0.
pub async fn create_lecture(
    db: &DatabaseConnection,
    section_id: i32,
) -> Result<entity::lecture::Model, DbErr> {
    entity::lecture::ActiveModel {
        section_id: ActiveValue::Set(section_id),
        title: ActiveValue::Set(format!("Lecture {}", next_id())),
        content: ActiveValue::Set(Some("Lecture body".to_string())),
        video_upload_id: ActiveValue::Set(None),
        duration_seconds: ActiveValue::Set(300),
        position: ActiveValue::Set(0),
        is_preview: ActiveValue::Set(false),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
