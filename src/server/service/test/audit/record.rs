use super::*;

/// Tests recording an audit entry.
///
/// Verifies that the actor, action, entity and JSON details are stored.
///
/// Expected: Ok with every field of the entry
#[tokio::test]
async fn stores_entry_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::create_admin(db).await?;

    let entry = AuditService::new(db)
        .record(
            AuditEntry::new(Some(admin.id), "course.publish", "course")
                .entity_id(42)
                .details(json!({ "title": "Rust" })),
        )
        .await?;

    assert_eq!(entry.actor_id, Some(admin.id));
    assert_eq!(entry.action, "course.publish");
    assert_eq!(entry.entity_type, "course");
    assert_eq!(entry.entity_id.as_deref(), Some("42"));

    let details: serde_json::Value = serde_json::from_str(&entry.details.unwrap()).unwrap();
    assert_eq!(details, json!({ "title": "Rust" }));

    Ok(())
}

/// Tests recording a system entry without an actor or entity.
///
/// Expected: Ok with empty actor, entity id and details
#[tokio::test]
async fn stores_system_entry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let entry = AuditService::new(db)
        .record(AuditEntry::new(None, "setting.seed", "system_setting"))
        .await?;

    assert!(entry.actor_id.is_none());
    assert!(entry.entity_id.is_none());
    assert!(entry.details.is_none());

    Ok(())
}
