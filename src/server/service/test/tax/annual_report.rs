use super::*;

/// Tests the yearly report of one instructor.
///
/// Verifies that only sales of the requested year count.
///
/// Expected: one sale, earnings 7000
#[tokio::test]
async fn sums_sales_of_the_year() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    factory::create_completed_transaction(db, student.id, course.id, 10_000, noon(2023, 12, 31))
        .await?;
    factory::create_completed_transaction(db, student.id, course.id, 10_000, noon(2024, 7, 1))
        .await?;

    let report = TaxService::new(db).annual_report(instructor.id, 2024).await?;

    assert_eq!(report.year, 2024);
    assert_eq!(report.instructor_id, instructor.id);
    assert_eq!(report.totals.transaction_count, 1);
    assert_eq!(report.totals.instructor_share_cents, 7000);
    assert_eq!(report.paid_payouts_cents, 0);

    Ok(())
}

/// Tests payouts in the yearly report.
///
/// Verifies that only paid payouts count.
///
/// Expected: paid_payouts_cents equals the paid payout
#[tokio::test]
async fn includes_paid_payouts() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, _) = factory::helpers::create_published_course(db).await?;
    let year = Utc::now().year();
    factory::payout::create_payout(db, instructor.id, 4200, date(2020, 1, 1), date(2020, 2, 1), "paid")
        .await?;
    factory::payout::create_payout(
        db,
        instructor.id,
        9900,
        date(2020, 2, 1),
        date(2020, 3, 1),
        "pending",
    )
    .await?;

    let report = TaxService::new(db).annual_report(instructor.id, year).await?;

    assert_eq!(report.paid_payouts_cents, 4200);

    Ok(())
}

/// Tests reports for every instructor.
///
/// Verifies that students are not listed and instructors without sales get zeros.
///
/// Expected: two reports, no student
#[tokio::test]
async fn lists_every_instructor() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (seller, course) = factory::helpers::create_published_course(db).await?;
    let idle = factory::create_instructor(db).await?;
    let student = factory::create_user(db).await?;
    factory::create_completed_transaction(db, student.id, course.id, 10_000, noon(2024, 2, 1))
        .await?;

    let reports = TaxService::new(db).annual_reports(2024).await?;

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.instructor_id != student.id));
    let seller_report = reports.iter().find(|r| r.instructor_id == seller.id).unwrap();
    let idle_report = reports.iter().find(|r| r.instructor_id == idle.id).unwrap();
    assert_eq!(seller_report.totals.gross_cents, 10_000);
    assert_eq!(idle_report.totals.transaction_count, 0);

    Ok(())
}

/// Tests a report for a user that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn unknown_instructor_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = TaxService::new(db).annual_report(404, 2024).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
