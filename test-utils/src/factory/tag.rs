//! Tag factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a tag named `"Tag {id}"` with slug `"tag-{id}"`.
pub async fn create_tag(db: &DatabaseConnection) -> Result<entity::tag::Model, DbErr> {
    let id = next_id();
    create_tag_named(db, &format!("Tag {}", id), &format!("tag-{}", id)).await
}

pub async fn create_tag_named(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
) -> Result<entity::tag::Model, DbErr> {
    entity::tag::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        slug: ActiveValue::Set(slug.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Links a tag to a course.
pub async fn tag_course(
    db: &DatabaseConnection,
    course_id: i32,
    tag_id: i32,
) -> Result<entity::course_tag::Model, DbErr> {
    entity::course_tag::ActiveModel {
        course_id: ActiveValue::Set(course_id),
        tag_id: ActiveValue::Set(tag_id),
    }
    .insert(db)
    .await
}
