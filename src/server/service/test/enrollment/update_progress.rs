use super::*;

/// Tests reaching and then leaving full progress.
///
/// Verifies that 100 % stamps the completion time and lower progress clears it.
///
/// Expected: completed_at set at 100, cleared at 80
#[tokio::test]
async fn tracks_completion() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    factory::create_enrollment(db, student.id, course.id).await?;
    let student = User::from_entity(student)?;
    let service = EnrollmentService::new(db);

    let halfway = service.update_progress(&student, course.id, 50).await?;
    assert_eq!(halfway.progress_percent, 50);
    assert!(halfway.completed_at.is_none());

    let done = service.update_progress(&student, course.id, 100).await?;
    assert!(done.completed_at.is_some());

    let again = service.update_progress(&student, course.id, 100).await?;
    assert!(again.completed_at.is_some());

    let reopened = service.update_progress(&student, course.id, 80).await?;
    assert_eq!(reopened.progress_percent, 80);
    assert!(reopened.completed_at.is_none());

    Ok(())
}

/// Tests progress values outside the percentage range.
///
/// Expected: Err(BadRequest) for -1 and 101
#[tokio::test]
async fn rejects_out_of_range_progress() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    factory::create_enrollment(db, student.id, course.id).await?;
    let student = User::from_entity(student)?;
    let service = EnrollmentService::new(db);

    for progress in [-1, 101] {
        let result = service.update_progress(&student, course.id, progress).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}

/// Tests recording progress for a revoked enrollment.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn requires_active_enrollment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    factory::create_enrollment(db, student.id, course.id).await?;
    let student = User::from_entity(student)?;
    let service = EnrollmentService::new(db);

    service.unenroll(&student, course.id).await?;
    let result = service.update_progress(&student, course.id, 10).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
