use super::*;

/// Records three entries: two by `first` (a course and a tag) and one by `second`.
async fn seed(
    service: &AuditService<'_>,
    first: i32,
    second: i32,
) -> Result<(), AppError> {
    for (actor, action, entity_type) in [
        (first, "course.create", "course"),
        (first, "tag.create", "tag"),
        (second, "course.update", "course"),
    ] {
        service
            .record(AuditEntry::new(Some(actor), action, entity_type).entity_id(1))
            .await?;
    }

    Ok(())
}

/// Tests listing every entry.
///
/// Expected: three entries, newest first
#[tokio::test]
async fn lists_newest_first() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_instructor(db).await?;
    let second = factory::create_admin(db).await?;
    let service = AuditService::new(db);
    seed(&service, first.id, second.id).await?;

    let page = service
        .list(AuditFilter::default(), PageRequest::new(0, 50))
        .await?;

    assert_eq!(page.total, 3);
    let actions: Vec<&str> = page.items.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["course.update", "tag.create", "course.create"]);

    Ok(())
}

/// Tests the actor and entity type filters alone and combined.
///
/// Expected: 2 entries by actor, 2 by entity type, 1 for both
#[tokio::test]
async fn filters_by_actor_and_entity_type() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_instructor(db).await?;
    let second = factory::create_admin(db).await?;
    let service = AuditService::new(db);
    seed(&service, first.id, second.id).await?;

    let by_actor = service
        .list(
            AuditFilter {
                actor_id: Some(first.id),
                entity_type: None,
            },
            PageRequest::new(0, 50),
        )
        .await?;
    assert_eq!(by_actor.total, 2);
    assert!(by_actor.items.iter().all(|e| e.actor_id == Some(first.id)));

    let by_type = service
        .list(
            AuditFilter {
                actor_id: None,
                entity_type: Some("course".to_string()),
            },
            PageRequest::new(0, 50),
        )
        .await?;
    assert_eq!(by_type.total, 2);
    assert!(by_type.items.iter().all(|e| e.entity_type == "course"));

    let both = service
        .list(
            AuditFilter {
                actor_id: Some(first.id),
                entity_type: Some("course".to_string()),
            },
            PageRequest::new(0, 50),
        )
        .await?;
    assert_eq!(both.total, 1);
    assert_eq!(both.items[0].action, "course.create");

    Ok(())
}

/// Tests paging through entries.
///
/// Expected: one entry per page with the total across pages
#[tokio::test]
async fn paginates_entries() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_instructor(db).await?;
    let second = factory::create_admin(db).await?;
    let service = AuditService::new(db);
    seed(&service, first.id, second.id).await?;

    let page = service
        .list(AuditFilter::default(), PageRequest::new(2, 1))
        .await?;

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].action, "course.create");

    Ok(())
}
