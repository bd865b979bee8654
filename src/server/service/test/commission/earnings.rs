use super::*;

/// Tests that shares are rounded per transaction before summing.
///
/// Verifies that three sales of 5 cents at 70 % earn 4 cents each (3.5 rounded up),
/// not 11 cents for the 15 cent total.
///
/// Expected: 3 transactions, gross 15, share 12
#[tokio::test]
async fn rounds_each_transaction() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, course) = factory::helpers::create_published_course(db).await?;
    for _ in 0..3 {
        let student = factory::create_user(db).await?;
        factory::create_completed_transaction(db, student.id, course.id, 5, noon(2024, 3, 10))
            .await?;
    }

    let earnings = CommissionService::new(db)
        .earnings(instructor.id, date(2024, 3, 1), date(2024, 4, 1))
        .await?;

    assert_eq!(earnings.commission_rate_bps, 7000);
    assert_eq!(earnings.totals.transaction_count, 3);
    assert_eq!(earnings.totals.gross_cents, 15);
    assert_eq!(earnings.totals.instructor_share_cents, 12);
    assert_eq!(earnings.totals.platform_fee_cents(), 3);

    Ok(())
}

/// Tests earnings on a partially refunded sale.
///
/// Verifies that the share is computed from the net amount.
///
/// Expected: net 7500 and share 5250
#[tokio::test]
async fn uses_net_of_refunds() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    TransactionFactory::new(db, student.id, course.id)
        .refund_amount_cents(2500)
        .status("partially_refunded")
        .completed_at(Some(noon(2024, 5, 2)))
        .build()
        .await?;

    let earnings = CommissionService::new(db)
        .earnings(instructor.id, date(2024, 5, 1), date(2024, 6, 1))
        .await?;

    assert_eq!(earnings.totals.refunds_cents, 2500);
    assert_eq!(earnings.totals.net_cents(), 7500);
    assert_eq!(earnings.totals.instructor_share_cents, 5250);
    assert_eq!(earnings.courses.len(), 1);
    assert_eq!(earnings.courses[0].course_id, course.id);

    Ok(())
}

/// Tests which transactions count towards a period.
///
/// Verifies that pending sales and sales completed on the exclusive end date are left out.
///
/// Expected: only the in-range completed sale counts
#[tokio::test]
async fn counts_only_settled_sales_in_range() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    factory::create_completed_transaction(db, student.id, course.id, 10_000, noon(2024, 1, 31))
        .await?;
    factory::create_completed_transaction(
        db,
        student.id,
        course.id,
        10_000,
        start_of_day(date(2024, 2, 1)),
    )
    .await?;
    TransactionFactory::new(db, student.id, course.id)
        .status("pending")
        .completed_at(None)
        .build()
        .await?;

    let earnings = CommissionService::new(db)
        .earnings(instructor.id, date(2024, 1, 1), date(2024, 2, 1))
        .await?;

    assert_eq!(earnings.totals.transaction_count, 1);
    assert_eq!(earnings.totals.gross_cents, 10_000);

    Ok(())
}

/// Tests rate selection.
///
/// Verifies that the instructor override wins and that instructors without one follow
/// the platform default setting.
///
/// Expected: 8000 for the override, 6000 from the setting
#[tokio::test]
async fn applies_override_then_platform_default() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    SettingService::new(db)
        .upsert(&admin, DEFAULT_COMMISSION_RATE_KEY, "6000", None)
        .await?;

    let special = factory::user::UserFactory::new(db)
        .role("instructor")
        .commission_rate_bps(8000)
        .build()
        .await?;
    let regular = factory::create_instructor(db).await?;
    let service = CommissionService::new(db);

    assert_eq!(service.effective_rate_bps(&User::from_entity(special)?).await?, 8000);
    assert_eq!(service.effective_rate_bps(&User::from_entity(regular)?).await?, 6000);

    Ok(())
}

/// Tests an empty or reversed range.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_empty_range() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;

    let result = CommissionService::new(db)
        .earnings(instructor.id, date(2024, 3, 1), date(2024, 3, 1))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
