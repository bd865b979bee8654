use super::*;

/// Tests storing a new version.
///
/// Expected: Ok with an inactive document
#[tokio::test]
async fn stores_inactive_version() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;

    let document = LegalService::new(db)
        .create(&admin, terms("1.0", "# Terms"))
        .await?;

    assert_eq!(document.version, "1.0");
    assert!(!document.is_active);
    assert!(document.activated_at.is_none());

    Ok(())
}

/// Tests a duplicate version and an unknown document type.
///
/// Expected: Err(Conflict) for the duplicate, Err(BadRequest) for the type
#[tokio::test]
async fn rejects_duplicate_version_and_unknown_type() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let service = LegalService::new(db);

    service.create(&admin, terms("1.0", "# Terms")).await?;
    let duplicate = service.create(&admin, terms("1.0", "# Other")).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let unknown = CreateLegalDocumentParams {
        document_type: "cookie_banner".to_string(),
        ..terms("1.0", "# Cookies")
    };
    let result = service.create(&admin, unknown).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
