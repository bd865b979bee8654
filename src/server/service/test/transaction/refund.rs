use super::*;

/// Tests refunding the whole remaining amount.
///
/// Verifies that the transaction becomes refunded and the buyer loses access.
///
/// Expected: Ok with refunded status and a revoked enrollment
#[tokio::test]
async fn full_refund_revokes_enrollment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::default();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let (_, course) = factory::helpers::create_published_course(db).await?;
    let buyer = factory::create_user(db).await?;
    let tx = TransactionFactory::new(db, buyer.id, course.id).build().await?;
    factory::create_enrollment(db, buyer.id, course.id).await?;

    let refunded = TransactionService::new(db, &gateway)
        .refund(
            &admin,
            RefundParams {
                transaction_id: tx.id,
                amount_cents: None,
                reason: Some("Requested by customer".to_string()),
            },
        )
        .await?;

    assert_eq!(refunded.status, TransactionStatus::Refunded);
    assert_eq!(refunded.refund_amount_cents, 10_000);
    assert_eq!(refunded.net_amount_cents(), 0);

    let enrollment = EnrollmentRepository::new(db)
        .find_by_user_and_course(buyer.id, course.id)
        .await?
        .unwrap();
    assert_eq!(enrollment.status, EnrollmentStatus::Revoked);

    Ok(())
}

/// Tests two partial refunds that add up to the price.
///
/// Verifies that access is kept after the first and revoked after the second.
///
/// Expected: partially_refunded, then refunded
#[tokio::test]
async fn partial_refunds_accumulate() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::default();
    let service = TransactionService::new(db, &gateway);

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let (_, course) = factory::helpers::create_published_course(db).await?;
    let buyer = factory::create_user(db).await?;
    let tx = TransactionFactory::new(db, buyer.id, course.id).build().await?;
    factory::create_enrollment(db, buyer.id, course.id).await?;

    let first = service
        .refund(
            &admin,
            RefundParams {
                transaction_id: tx.id,
                amount_cents: Some(4000),
                reason: None,
            },
        )
        .await?;
    assert_eq!(first.status, TransactionStatus::PartiallyRefunded);
    assert_eq!(first.refund_amount_cents, 4000);
    let enrollment = EnrollmentRepository::new(db)
        .find_by_user_and_course(buyer.id, course.id)
        .await?
        .unwrap();
    assert_eq!(enrollment.status, EnrollmentStatus::Active);

    let second = service
        .refund(
            &admin,
            RefundParams {
                transaction_id: tx.id,
                amount_cents: Some(6000),
                reason: None,
            },
        )
        .await?;
    assert_eq!(second.status, TransactionStatus::Refunded);
    assert_eq!(second.refund_amount_cents, 10_000);

    Ok(())
}

/// Tests refunding more than what is left.
///
/// Expected: Err(BadRequest) and no change to the transaction
#[tokio::test]
async fn rejects_amount_above_remaining() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::default();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let (_, course) = factory::helpers::create_published_course(db).await?;
    let buyer = factory::create_user(db).await?;
    let tx = TransactionFactory::new(db, buyer.id, course.id)
        .refund_amount_cents(8000)
        .status("partially_refunded")
        .build()
        .await?;

    let result = TransactionService::new(db, &gateway)
        .refund(
            &admin,
            RefundParams {
                transaction_id: tx.id,
                amount_cents: Some(2001),
                reason: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let stored = TransactionRepository::new(db).find_by_id(tx.id).await?.unwrap();
    assert_eq!(stored.refund_amount_cents, 8000);

    Ok(())
}

/// Tests refunding a zero amount.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_non_positive_amount() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::default();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let (_, course) = factory::helpers::create_published_course(db).await?;
    let buyer = factory::create_user(db).await?;
    let tx = TransactionFactory::new(db, buyer.id, course.id).build().await?;

    let result = TransactionService::new(db, &gateway)
        .refund(
            &admin,
            RefundParams {
                transaction_id: tx.id,
                amount_cents: Some(0),
                reason: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests refunding a pending transaction.
///
/// Verifies that only settled transactions are refundable.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_pending_transaction() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::default();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let (_, course) = factory::helpers::create_published_course(db).await?;
    let buyer = factory::create_user(db).await?;
    let tx = TransactionFactory::new(db, buyer.id, course.id)
        .status("pending")
        .completed_at(None)
        .build()
        .await?;

    let result = TransactionService::new(db, &gateway)
        .refund(
            &admin,
            RefundParams {
                transaction_id: tx.id,
                amount_cents: None,
                reason: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests a refund while the gateway is failing.
///
/// Verifies that the refund is still recorded locally.
///
/// Expected: Ok with the refund applied
#[tokio::test]
async fn records_refund_when_gateway_fails() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let gateway = FakeGateway::failing_refunds();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let (_, course) = factory::helpers::create_published_course(db).await?;
    let buyer = factory::create_user(db).await?;
    let tx = TransactionFactory::new(db, buyer.id, course.id).build().await?;

    let refunded = TransactionService::new(db, &gateway)
        .refund(
            &admin,
            RefundParams {
                transaction_id: tx.id,
                amount_cents: Some(2500),
                reason: None,
            },
        )
        .await?;

    assert_eq!(refunded.status, TransactionStatus::PartiallyRefunded);
    assert_eq!(refunded.refund_amount_cents, 2500);

    Ok(())
}
