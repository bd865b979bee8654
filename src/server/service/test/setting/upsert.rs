use super::*;

/// Tests creating and then replacing a setting.
///
/// Expected: one setting holding the second value
#[tokio::test]
async fn creates_then_replaces_value() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let service = SettingService::new(db);

    service
        .upsert(&admin, "support.email", "help@example.com", None)
        .await?;
    let updated = service
        .upsert(
            &admin,
            "support.email",
            "support@example.com",
            Some("Shown in receipts".to_string()),
        )
        .await?;

    assert_eq!(updated.value, "support@example.com");
    assert_eq!(updated.description.as_deref(), Some("Shown in receipts"));
    assert_eq!(service.get_all().await?.len(), 1);
    assert_eq!(service.get("support.email").await?.value, "support@example.com");

    Ok(())
}

/// Tests the typed commission rate setting.
///
/// Verifies that out-of-range and non-numeric rates are rejected and a valid one is used.
///
/// Expected: Err(BadRequest) twice, then the new default applies
#[tokio::test]
async fn validates_commission_rate() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let service = SettingService::new(db);

    assert_eq!(
        service.default_commission_rate_bps().await?,
        FALLBACK_COMMISSION_RATE_BPS
    );

    for value in ["10001", "seventy"] {
        let result = service
            .upsert(&admin, DEFAULT_COMMISSION_RATE_KEY, value, None)
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    service
        .upsert(&admin, DEFAULT_COMMISSION_RATE_KEY, "6500", None)
        .await?;
    assert_eq!(service.default_commission_rate_bps().await?, 6500);

    Ok(())
}

/// Tests keys with characters outside the allowed set.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_invalid_key() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;

    let result = SettingService::new(db)
        .upsert(&admin, "bad key!", "x", None)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
