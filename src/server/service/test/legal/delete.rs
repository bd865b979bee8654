use super::*;

/// Tests deleting versions.
///
/// Verifies that the active version is protected while an inactive one can be removed.
///
/// Expected: Err(BadRequest) for the active version, Ok for the inactive one
#[tokio::test]
async fn only_inactive_versions_are_deleted() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let active =
        factory::legal_document::create_legal_document(db, "refund_policy", "2.0", true).await?;
    let draft =
        factory::legal_document::create_legal_document(db, "refund_policy", "3.0", false).await?;
    let service = LegalService::new(db);

    let result = service.delete(&admin, active.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    service.delete(&admin, draft.id).await?;
    let remaining = service.list("refund_policy").await?;
    assert_eq!(remaining.iter().map(|d| d.id).collect::<Vec<_>>(), vec![active.id]);

    Ok(())
}
