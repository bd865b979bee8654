use super::*;

/// Tests creating a payout for a month with sales.
///
/// Verifies that the amount is the instructor's share of the period and the rate used
/// is stored on the payout.
///
/// Expected: pending payout of 14000 at 7000 bps
#[tokio::test]
async fn pays_out_period_earnings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let (instructor, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    for day in [5, 20] {
        factory::create_completed_transaction(db, student.id, course.id, 10_000, noon(2024, 1, day))
            .await?;
    }

    let payout = PayoutService::new(db)
        .create(&admin, january(instructor.id))
        .await?;

    assert_eq!(payout.status, PayoutStatus::Pending);
    assert_eq!(payout.amount_cents, 14_000);
    assert_eq!(payout.commission_rate_bps, 7000);
    assert_eq!(payout.period_start, date(2024, 1, 1));
    assert_eq!(payout.period_end, date(2024, 2, 1));

    Ok(())
}

/// Tests a second payout overlapping an active one.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_overlapping_period() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let (instructor, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    factory::create_completed_transaction(db, student.id, course.id, 10_000, noon(2024, 1, 15))
        .await?;
    factory::payout::create_payout(
        db,
        instructor.id,
        7000,
        date(2024, 1, 10),
        date(2024, 1, 20),
        "processing",
    )
    .await?;

    let result = PayoutService::new(db)
        .create(&admin, january(instructor.id))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests reusing the period of a cancelled payout.
///
/// Verifies that cancelled and failed payouts release their period.
///
/// Expected: Ok
#[tokio::test]
async fn cancelled_payout_releases_period() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let (instructor, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    factory::create_completed_transaction(db, student.id, course.id, 10_000, noon(2024, 1, 15))
        .await?;
    for status in ["cancelled", "failed"] {
        factory::payout::create_payout(
            db,
            instructor.id,
            7000,
            date(2024, 1, 1),
            date(2024, 2, 1),
            status,
        )
        .await?;
    }

    let payout = PayoutService::new(db)
        .create(&admin, january(instructor.id))
        .await?;

    assert_eq!(payout.amount_cents, 7000);

    Ok(())
}

/// Tests payouts that cannot be created.
///
/// Verifies that a student, a period without earnings and an empty period are rejected.
///
/// Expected: Err(BadRequest) for each
#[tokio::test]
async fn rejects_invalid_requests() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let instructor = factory::create_instructor(db).await?;
    let student = factory::create_user(db).await?;
    let service = PayoutService::new(db);

    let empty_period = CreatePayoutParams {
        period_end: date(2024, 1, 1),
        ..january(instructor.id)
    };

    for params in [january(student.id), january(instructor.id), empty_period] {
        let result = service.create(&admin, params).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}
