use super::*;

/// Tests setting and clearing a commission override.
///
/// Expected: Some(8500), then None
#[tokio::test]
async fn sets_and_clears_override() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let instructor = factory::create_instructor(db).await?;
    let service = UserService::new(db);

    let set = service
        .set_commission_rate(&admin, instructor.id, Some(8500))
        .await?;
    assert_eq!(set.commission_rate_bps, Some(8500));

    let cleared = service
        .set_commission_rate(&admin, instructor.id, None)
        .await?;
    assert_eq!(cleared.commission_rate_bps, None);

    Ok(())
}

/// Tests rates outside basis point bounds.
///
/// Expected: Err(BadRequest) for -1 and 10001
#[tokio::test]
async fn rejects_out_of_range_rate() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let instructor = factory::create_instructor(db).await?;
    let service = UserService::new(db);

    for rate in [-1, 10_001] {
        let result = service
            .set_commission_rate(&admin, instructor.id, Some(rate))
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}
