use super::*;

/// Tests a student applying to teach.
///
/// Expected: Ok with a pending application
#[tokio::test]
async fn student_submits_application() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let student = User::from_entity(factory::create_user(db).await?)?;

    let application = ApplicationService::new(db).submit(&student, params()).await?;

    assert_eq!(application.user_id, student.id);
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.website.as_deref(), Some("https://example.com"));

    Ok(())
}

/// Tests a second application while one is pending.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_second_pending_application() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let student = User::from_entity(factory::create_user(db).await?)?;
    let service = ApplicationService::new(db);

    service.submit(&student, params()).await?;
    let result = service.submit(&student, params()).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests applying again after a rejection.
///
/// Expected: Ok with a new pending application
#[tokio::test]
async fn allows_reapplying_after_rejection() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let student = factory::create_user(db).await?;
    factory::instructor_application::create_application(db, student.id, "rejected").await?;
    let student = User::from_entity(student)?;

    let application = ApplicationService::new(db).submit(&student, params()).await?;

    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(ApplicationService::new(db).list_own(&student).await?.len(), 2);

    Ok(())
}

/// Tests applications that cannot be submitted.
///
/// Verifies that instructors cannot apply and that a bio is required.
///
/// Expected: Err(BadRequest) for both
#[tokio::test]
async fn rejects_instructor_and_empty_bio() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = User::from_entity(factory::create_instructor(db).await?)?;
    let student = User::from_entity(factory::create_user(db).await?)?;
    let service = ApplicationService::new(db);

    let as_instructor = service.submit(&instructor, params()).await;
    assert!(matches!(as_instructor, Err(AppError::BadRequest(_))));

    let empty_bio = SubmitApplicationParams {
        bio: " ".to_string(),
        ..params()
    };
    let result = service.submit(&student, empty_bio).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
