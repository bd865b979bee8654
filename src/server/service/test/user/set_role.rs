use super::*;

/// Tests promoting a student to instructor.
///
/// Expected: Ok with the instructor role
#[tokio::test]
async fn changes_role() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let student = factory::create_user(db).await?;

    let updated = UserService::new(db)
        .set_role(&admin, student.id, "instructor")
        .await?;

    assert_eq!(updated.role, Role::Instructor);
    assert!(updated.is_instructor());

    Ok(())
}

/// Tests an admin changing their own role.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_own_role_change() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;

    let result = UserService::new(db).set_role(&admin, admin.id, "student").await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests an unknown role name and an unknown user.
///
/// Expected: Err(BadRequest) and Err(NotFound)
#[tokio::test]
async fn rejects_unknown_role_and_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_log_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let student = factory::create_user(db).await?;
    let service = UserService::new(db);

    let bad_role = service.set_role(&admin, student.id, "superuser").await;
    assert!(matches!(bad_role, Err(AppError::BadRequest(_))));

    let missing = service.set_role(&admin, 9999, "student").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}
