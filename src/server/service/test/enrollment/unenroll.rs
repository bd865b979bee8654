use super::*;

/// Tests leaving a course.
///
/// Verifies that the enrollment is kept with revoked status.
///
/// Expected: Ok and the enrollment is revoked
#[tokio::test]
async fn revokes_enrollment() -> Result<(), AppError> {
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

    EnrollmentService::new(db)
        .unenroll(&student, course.id)
        .await?;

    let enrollment = EnrollmentRepository::new(db)
        .find_by_user_and_course(student.id, course.id)
        .await?
        .unwrap();
    assert_eq!(enrollment.status, EnrollmentStatus::Revoked);

    Ok(())
}

/// Tests leaving a course the user is not enrolled in.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn fails_without_enrollment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_published_course(db).await?;
    let student = User::from_entity(factory::create_user(db).await?)?;

    let result = EnrollmentService::new(db)
        .unenroll(&student, course.id)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
