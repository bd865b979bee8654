use super::*;

/// Tests summing paid payouts.
///
/// Verifies that only paid payouts of the instructor count; pending payouts and other
/// instructors are ignored.
///
/// Expected: Ok(3000)
#[tokio::test]
async fn sums_only_paid_payouts_of_instructor() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let other = factory::create_instructor(db).await?;

    for (amount, start, end) in [
        (1000, date(2024, 1, 1), date(2024, 2, 1)),
        (2000, date(2024, 2, 1), date(2024, 3, 1)),
    ] {
        factory::payout::create_payout(db, instructor.id, amount, start, end, "paid").await?;
    }
    factory::payout::create_payout(
        db,
        instructor.id,
        5000,
        date(2024, 3, 1),
        date(2024, 4, 1),
        "pending",
    )
    .await?;
    factory::payout::create_payout(db, other.id, 9000, date(2024, 1, 1), date(2024, 2, 1), "paid")
        .await?;

    let now = Utc::now();
    let total = PayoutRepository::new(db)
        .sum_paid_in_range(instructor.id, now - Duration::days(1), now + Duration::days(1))
        .await?;

    assert_eq!(total, 3000);

    Ok(())
}

/// Tests payouts paid outside the range are excluded.
///
/// Expected: Ok(0)
#[tokio::test]
async fn ignores_payouts_paid_outside_range() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    factory::payout::create_payout(
        db,
        instructor.id,
        1000,
        date(2024, 1, 1),
        date(2024, 2, 1),
        "paid",
    )
    .await?;

    let now = Utc::now();
    let total = PayoutRepository::new(db)
        .sum_paid_in_range(instructor.id, now - Duration::days(30), now - Duration::days(1))
        .await?;

    assert_eq!(total, 0);

    Ok(())
}
