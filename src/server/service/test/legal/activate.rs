use super::*;

/// Tests activating a newer version.
///
/// Verifies that the previous version is deactivated and the public document is the new
/// version rendered to HTML.
///
/// Expected: only the new version active, rendered heading in the HTML
#[tokio::test]
async fn replaces_active_version() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let old = factory::legal_document::create_legal_document(db, "terms_of_service", "1.0", true)
        .await?;
    let service = LegalService::new(db);

    let new = service
        .create(&admin, terms("2.0", "# Updated terms\n\nRead *carefully*."))
        .await?;
    let activated = service.activate(&admin, new.id).await?;
    assert!(activated.is_active);
    assert!(activated.activated_at.is_some());

    let versions = service.list("terms_of_service").await?;
    let active: Vec<i32> = versions.iter().filter(|d| d.is_active).map(|d| d.id).collect();
    assert_eq!(active, vec![new.id]);
    assert!(versions.iter().any(|d| d.id == old.id && !d.is_active));

    let public = service.get_active("terms_of_service").await?;
    assert_eq!(public.document.version, "2.0");
    assert!(public.html.contains("<h1>Updated terms</h1>"));
    assert!(public.html.contains("<em>carefully</em>"));

    Ok(())
}

/// Tests that raw HTML in a document is escaped when served.
///
/// Expected: no script tag in the rendered HTML
#[tokio::test]
async fn escapes_embedded_html() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let service = LegalService::new(db);

    let document = service
        .create(&admin, terms("1.0", "<script>alert(1)</script>\n\nHello"))
        .await?;
    service.activate(&admin, document.id).await?;

    let public = service.get_active("terms_of_service").await?;
    assert!(!public.html.contains("<script>"));

    Ok(())
}

/// Tests fetching a type without an active version.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn missing_active_version_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::legal_document::create_legal_document(db, "privacy_policy", "1.0", false).await?;

    let result = LegalService::new(db).get_active("privacy_policy").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
