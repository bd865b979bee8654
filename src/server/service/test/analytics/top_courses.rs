use super::*;

/// Tests ranking courses by net revenue.
///
/// Verifies that refunds lower a course's rank and that the limit is applied.
///
/// Expected: the course with more net revenue first, only two entries
#[tokio::test]
async fn ranks_by_net_revenue() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, refunded) = factory::helpers::create_published_course(db).await?;
    let (_, steady) = factory::helpers::create_published_course(db).await?;
    let (_, small) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;

    TransactionFactory::new(db, student.id, refunded.id)
        .amount_cents(20_000)
        .refund_amount_cents(15_000)
        .status("partially_refunded")
        .completed_at(Some(noon(2024, 8, 1)))
        .build()
        .await?;
    for _ in 0..2 {
        factory::create_completed_transaction(db, student.id, steady.id, 10_000, noon(2024, 8, 2))
            .await?;
    }
    factory::create_completed_transaction(db, student.id, small.id, 1000, noon(2024, 8, 3))
        .await?;

    let top = AnalyticsService::new(db)
        .top_courses(date(2024, 8, 1), date(2024, 9, 1), Some(2))
        .await?;

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].course_id, steady.id);
    assert_eq!(top[0].transaction_count, 2);
    assert_eq!(top[0].net_cents, 20_000);
    assert_eq!(top[0].title, steady.title);
    assert_eq!(top[1].course_id, refunded.id);
    assert_eq!(top[1].net_cents, 5000);

    Ok(())
}

/// Tests limits outside the accepted range.
///
/// Expected: Err(BadRequest) for 0 and 101
#[tokio::test]
async fn rejects_invalid_limit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let service = AnalyticsService::new(db);

    for limit in [0, 101] {
        let result = service
            .top_courses(date(2024, 1, 1), date(2024, 2, 1), Some(limit))
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}
