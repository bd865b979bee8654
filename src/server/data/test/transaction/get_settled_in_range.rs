use super::*;

/// Tests only settled transactions inside the range are returned.
///
/// Verifies that pending and failed transactions are skipped, refunded ones are kept,
/// and the end bound is exclusive.
///
/// Expected: Ok with the completed and refunded transactions, in completion order
#[tokio::test]
async fn returns_settled_transactions_in_range() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

    let completed =
        factory::create_completed_transaction(db, student.id, course.id, 5000, start).await?;
    let refunded = TransactionFactory::new(db, student.id, course.id)
        .status("refunded")
        .refund_amount_cents(10_000)
        .completed_at(Some(start + Duration::days(3)))
        .build()
        .await?;
    TransactionFactory::new(db, student.id, course.id)
        .status("pending")
        .completed_at(None)
        .build()
        .await?;
    TransactionFactory::new(db, student.id, course.id)
        .status("failed")
        .completed_at(Some(start + Duration::days(1)))
        .build()
        .await?;
    factory::create_completed_transaction(db, student.id, course.id, 7000, end).await?;

    let result = TransactionRepository::new(db)
        .get_settled_in_range(None, start, end)
        .await?;

    let ids: Vec<i32> = result.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![completed.id, refunded.id]);

    Ok(())
}

/// Tests restricting the range query to an empty course list.
///
/// Expected: Ok with no transactions
#[tokio::test]
async fn empty_course_list_yields_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    let now = Utc::now();
    factory::create_completed_transaction(db, student.id, course.id, 5000, now).await?;

    let result = TransactionRepository::new(db)
        .get_settled_in_range(Some(Vec::new()), now - Duration::days(1), now + Duration::days(1))
        .await?;

    assert!(result.is_empty());

    Ok(())
}
