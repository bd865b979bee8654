//! Difficulty configuration factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a difficulty level with the given identifier and sort order.
pub async fn create_difficulty(
    db: &DatabaseConnection,
    level: &str,
    sort_order: i32,
) -> Result<entity::difficulty_configuration::Model, DbErr> {
    entity::difficulty_configuration::ActiveModel {
        level: ActiveValue::Set(level.to_string()),
        display_name: ActiveValue::Set(level.to_uppercase()),
        sort_order: ActiveValue::Set(sort_order),
        description: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
