use super::*;

/// Tests filtering payouts by instructor and status.
///
/// Expected: Ok with the pending payout of the first instructor only
#[tokio::test]
async fn filters_by_instructor_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_instructor(db).await?;
    let second = factory::create_instructor(db).await?;

    let expected = factory::payout::create_payout(
        db,
        first.id,
        1000,
        date(2024, 1, 1),
        date(2024, 2, 1),
        "pending",
    )
    .await?;
    factory::payout::create_payout(db, first.id, 2000, date(2024, 2, 1), date(2024, 3, 1), "paid")
        .await?;
    factory::payout::create_payout(
        db,
        second.id,
        3000,
        date(2024, 1, 1),
        date(2024, 2, 1),
        "pending",
    )
    .await?;

    let page = PayoutRepository::new(db)
        .get_filtered_paginated(
            Some(first.id),
            Some(PayoutStatus::Pending),
            PageRequest::new(0, 10),
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, expected.id);
    assert_eq!(page.items[0].amount_cents, 1000);

    Ok(())
}
