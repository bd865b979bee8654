use super::*;

/// Tests approving an application.
///
/// Verifies that the applicant becomes an instructor and the reviewer is recorded.
///
/// Expected: approved application and instructor role
#[tokio::test]
async fn approval_promotes_applicant() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let student = factory::create_user(db).await?;
    let application =
        factory::instructor_application::create_application(db, student.id, "pending").await?;

    let approved = ApplicationService::new(db)
        .approve(&admin, application.id)
        .await?;

    assert_eq!(approved.status, ApplicationStatus::Approved);
    assert_eq!(approved.reviewed_by, Some(admin.id));
    assert!(approved.reviewed_at.is_some());

    let user = UserRepository::new(db).find_by_id(student.id).await?.unwrap();
    assert_eq!(user.role, Role::Instructor);

    Ok(())
}

/// Tests rejecting an application.
///
/// Verifies that a reason is required and the applicant keeps the student role.
///
/// Expected: Err(BadRequest) without reason, then rejected with the reason
#[tokio::test]
async fn rejection_requires_reason() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let student = factory::create_user(db).await?;
    let application =
        factory::instructor_application::create_application(db, student.id, "pending").await?;
    let service = ApplicationService::new(db);

    let missing = service.reject(&admin, application.id, "").await;
    assert!(matches!(missing, Err(AppError::BadRequest(_))));

    let rejected = service
        .reject(&admin, application.id, "Not enough teaching experience")
        .await?;
    assert_eq!(rejected.status, ApplicationStatus::Rejected);
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("Not enough teaching experience")
    );

    let user = UserRepository::new(db).find_by_id(student.id).await?.unwrap();
    assert_eq!(user.role, Role::Student);

    Ok(())
}

/// Tests reviewing an application twice.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn reviewed_application_is_final() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let student = factory::create_user(db).await?;
    let application =
        factory::instructor_application::create_application(db, student.id, "approved").await?;

    let result = ApplicationService::new(db)
        .reject(&admin, application.id, "Changed my mind")
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests approving an application whose applicant became an admin meanwhile.
///
/// Expected: approved application and the admin role kept
#[tokio::test]
async fn approval_keeps_higher_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let reviewer = User::from_entity(factory::create_admin(db).await?)?;
    let applicant = factory::create_admin(db).await?;
    let application =
        factory::instructor_application::create_application(db, applicant.id, "pending").await?;

    let approved = ApplicationService::new(db)
        .approve(&reviewer, application.id)
        .await?;

    assert_eq!(approved.status, ApplicationStatus::Approved);

    let user = UserRepository::new(db)
        .find_by_id(applicant.id)
        .await?
        .unwrap();
    assert_eq!(user.role, Role::Admin);

    Ok(())
}
