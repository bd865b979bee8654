use super::*;

/// Tests admin user passes the admin check.
///
/// Verifies that the AuthGuard grants access when the session user exists and
/// has the admin role.
///
/// Expected: Ok(User) with role Admin
#[tokio::test]
async fn grants_admin_to_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::create_admin(db).await?;
    AuthSession::new(session).login(admin.id).await?;

    let user = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(user.id, admin.id);
    assert_eq!(user.role, Role::Admin);

    Ok(())
}

/// Tests admin user passes the instructor check.
///
/// Verifies that admins hold every instructor permission.
///
/// Expected: Ok(User)
#[tokio::test]
async fn grants_instructor_to_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::create_admin(db).await?;
    AuthSession::new(session).login(admin.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Instructor])
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Tests student is denied the instructor check.
///
/// Verifies that the AuthGuard denies access and records an access denied
/// security event for the user.
///
/// Expected: Err(AuthError::AccessDenied) and one security event
#[tokio::test]
async fn denies_instructor_to_student_and_records_event() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let student = factory::create_user(db).await?;
    AuthSession::new(session).login(student.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Instructor])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(user_id, message))) => {
            assert_eq!(user_id, student.id);
            assert!(message.contains("instructor"));
        }
        other => panic!("Expected AccessDenied error, got: {:?}", other),
    }

    let events = SecurityEventRepository::new(db)
        .get_filtered_paginated(SecurityEventFilter::default(), PageRequest::new(0, 10))
        .await?;
    assert_eq!(events.total, 1);
    assert_eq!(events.items[0].event_type, "access_denied");
    assert_eq!(events.items[0].severity, "warning");
    assert_eq!(events.items[0].user_id, Some(student.id));

    Ok(())
}

/// Tests instructor is denied the admin check.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_admin_to_instructor() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let instructor = factory::create_instructor(db).await?;
    AuthSession::new(session).login(instructor.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_, _)))
    ));

    Ok(())
}

/// Tests empty permission list only requires a login.
///
/// Expected: Ok(User) for a student
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let student = factory::create_user(db).await?;
    AuthSession::new(session).login(student.id).await?;

    let user = AuthGuard::new(db, session).require(&[]).await?;

    assert_eq!(user.id, student.id);

    Ok(())
}

/// Tests unauthenticated request is rejected.
///
/// Verifies that the AuthGuard denies access when no user id is in the session.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn denies_access_when_not_authenticated() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests session user missing from the database is rejected.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn denies_access_when_user_not_in_database() -> Result<(), AppError> {
    let mut test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session).login(4242).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(user_id))) => {
            assert_eq!(user_id, 4242)
        }
        other => panic!("Expected UserNotInDatabase error, got: {:?}", other),
    }

    Ok(())
}
