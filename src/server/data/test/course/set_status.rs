use super::*;

/// Tests publishing stamps the publication time.
///
/// Expected: Ok with status published and published_at set
#[tokio::test]
async fn publishing_sets_published_at() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    assert!(course.published_at.is_none());

    let updated = CourseRepository::new(db)
        .set_status(course.id, CourseStatus::Published)
        .await?
        .unwrap();

    assert_eq!(updated.status, CourseStatus::Published);
    assert!(updated.published_at.is_some());

    Ok(())
}

/// Tests archiving keeps the original publication time.
///
/// Expected: Ok with status archived and published_at unchanged
#[tokio::test]
async fn archiving_keeps_published_at() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_published_course(db).await?;

    let updated = CourseRepository::new(db)
        .set_status(course.id, CourseStatus::Archived)
        .await?
        .unwrap();

    assert_eq!(updated.status, CourseStatus::Archived);
    assert_eq!(updated.published_at, course.published_at);

    Ok(())
}
