use super::*;

/// Tests the happy path from pending to paid.
///
/// Expected: processing, then paid with a reference and `paid_at`
#[tokio::test]
async fn processes_then_pays() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let instructor = factory::create_instructor(db).await?;
    let payout = factory::payout::create_payout(
        db,
        instructor.id,
        5000,
        date(2024, 1, 1),
        date(2024, 2, 1),
        "pending",
    )
    .await?;
    let service = PayoutService::new(db);

    let processing = service.process(&admin, payout.id).await?;
    assert_eq!(processing.status, PayoutStatus::Processing);

    let paid = service
        .pay(&admin, payout.id, Some("wire-2024-001".to_string()))
        .await?;
    assert_eq!(paid.status, PayoutStatus::Paid);
    assert_eq!(paid.external_reference.as_deref(), Some("wire-2024-001"));
    assert!(paid.paid_at.is_some());

    Ok(())
}

/// Tests paying a payout that was never processed.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_skipping_processing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let instructor = factory::create_instructor(db).await?;
    let payout = factory::payout::create_payout(
        db,
        instructor.id,
        5000,
        date(2024, 1, 1),
        date(2024, 2, 1),
        "pending",
    )
    .await?;

    let result = PayoutService::new(db).pay(&admin, payout.id, None).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests failing a processing payout.
///
/// Verifies that a reason is required and stored.
///
/// Expected: Err(BadRequest) without reason, then failed with the reason
#[tokio::test]
async fn fail_requires_reason() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let instructor = factory::create_instructor(db).await?;
    let payout = factory::payout::create_payout(
        db,
        instructor.id,
        5000,
        date(2024, 1, 1),
        date(2024, 2, 1),
        "processing",
    )
    .await?;
    let service = PayoutService::new(db);

    let missing = service.fail(&admin, payout.id, "   ").await;
    assert!(matches!(missing, Err(AppError::BadRequest(_))));

    let failed = service.fail(&admin, payout.id, "Bank rejected").await?;
    assert_eq!(failed.status, PayoutStatus::Failed);
    assert_eq!(failed.failure_reason.as_deref(), Some("Bank rejected"));

    Ok(())
}

/// Tests that terminal payouts cannot change.
///
/// Expected: Err(BadRequest) when cancelling a paid payout
#[tokio::test]
async fn paid_payout_is_final() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let instructor = factory::create_instructor(db).await?;
    let payout = factory::payout::create_payout(
        db,
        instructor.id,
        5000,
        date(2024, 1, 1),
        date(2024, 2, 1),
        "paid",
    )
    .await?;

    let result = PayoutService::new(db).cancel(&admin, payout.id).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests cancelling a pending payout.
///
/// Expected: Ok with cancelled status
#[tokio::test]
async fn cancels_pending_payout() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let instructor = factory::create_instructor(db).await?;
    let payout = factory::payout::create_payout(
        db,
        instructor.id,
        5000,
        date(2024, 1, 1),
        date(2024, 2, 1),
        "pending",
    )
    .await?;

    let cancelled = PayoutService::new(db).cancel(&admin, payout.id).await?;

    assert_eq!(cancelled.status, PayoutStatus::Cancelled);

    Ok(())
}
