use super::*;

/// Tests publishing a course with a section and a lecture.
///
/// Expected: Ok with published status and `published_at` set
#[tokio::test]
async fn publishes_course_with_content() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let section = factory::create_section(db, course.id).await?;
    factory::create_lecture(db, section.id).await?;
    let instructor = User::from_entity(instructor)?;

    let published = CourseService::new(db)
        .publish(&instructor, course.id)
        .await?;

    assert_eq!(published.status, CourseStatus::Published);
    assert!(published.published_at.is_some());

    Ok(())
}

/// Tests publishing a course without lectures.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_course_without_lectures() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    factory::create_section(db, course.id).await?;
    let instructor = User::from_entity(instructor)?;

    let result = CourseService::new(db).publish(&instructor, course.id).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests archiving and republishing a course.
///
/// Verifies that a published course can be archived, that an archived course cannot be
/// archived again, and that it can be published again.
///
/// Expected: archived, then Err(BadRequest), then published
#[tokio::test]
async fn archive_and_republish() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, course) = factory::helpers::create_published_course(db).await?;
    let instructor = User::from_entity(instructor)?;
    let service = CourseService::new(db);

    let archived = service.archive(&instructor, course.id).await?;
    assert_eq!(archived.status, CourseStatus::Archived);

    let again = service.archive(&instructor, course.id).await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    let republished = service.publish(&instructor, course.id).await?;
    assert_eq!(republished.status, CourseStatus::Published);

    Ok(())
}

/// Tests publishing an already published course.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_already_published() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, course) = factory::helpers::create_published_course(db).await?;
    let instructor = User::from_entity(instructor)?;

    let result = CourseService::new(db).publish(&instructor, course.id).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
