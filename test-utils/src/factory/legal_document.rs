//! Legal document factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a legal document version with markdown content.
pub async fn create_legal_document(
    db: &DatabaseConnection,
    document_type: &str,
    version: &str,
    is_active: bool,
) -> Result<entity::legal_document::Model, DbErr> {
    let now = Utc::now();

    entity::legal_document::ActiveModel {
        document_type: ActiveValue::Set(document_type.to_string()),
        version: ActiveValue::Set(version.to_string()),
        title: ActiveValue::Set(format!("{} {}", document_type, version)),
        content: ActiveValue::Set("# Terms\n\nBe **nice**.".to_string()),
        is_active: ActiveValue::Set(is_active),
        created_at: ActiveValue::Set(now),
        activated_at: ActiveValue::Set(is_active.then_some(now)),
        ..Default::default()
    }
    .insert(db)
    .await
}
