use super::*;

/// Tests deleting a draft course without sales.
///
/// Expected: Ok and the course is gone
#[tokio::test]
async fn deletes_unsold_course() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let instructor = User::from_entity(instructor)?;
    let service = CourseService::new(db);

    service.delete(&instructor, course.id).await?;

    let result = service.get(Some(&instructor), course.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests deleting a course that has students.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_course_with_enrollments() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    factory::create_enrollment(db, student.id, course.id).await?;
    let instructor = User::from_entity(instructor)?;

    let result = CourseService::new(db).delete(&instructor, course.id).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests deleting a course with a refunded sale but no remaining enrollment.
///
/// Verifies that the transaction history alone blocks deletion.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_course_with_transactions() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    factory::transaction::TransactionFactory::new(db, student.id, course.id)
        .refund_amount_cents(10_000)
        .status("refunded")
        .build()
        .await?;
    let instructor = User::from_entity(instructor)?;

    let result = CourseService::new(db).delete(&instructor, course.id).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}
