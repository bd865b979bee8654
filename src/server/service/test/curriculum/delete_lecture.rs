use super::*;

/// Tests deleting a lecture from an owned course.
///
/// Expected: Ok with the lecture gone and its section kept
#[tokio::test]
async fn deletes_lecture() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let section = factory::create_section(db, course.id).await?;
    let existing = factory::create_lecture(db, section.id).await?;
    let instructor = User::from_entity(instructor)?;

    CurriculumService::new(db)
        .delete_lecture(&instructor, existing.id)
        .await?;

    let repo = CurriculumRepository::new(db);
    assert!(repo.find_lecture(existing.id).await?.is_none());
    assert!(repo.find_section(section.id).await?.is_some());

    Ok(())
}

/// Tests deleting another instructor's lecture.
///
/// Expected: Err(Forbidden) and the lecture kept
#[tokio::test]
async fn requires_course_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_instructor(db).await?;
    let course = factory::create_course(db, owner.id).await?;
    let section = factory::create_section(db, course.id).await?;
    let existing = factory::create_lecture(db, section.id).await?;
    let other = User::from_entity(factory::create_instructor(db).await?)?;

    let result = CurriculumService::new(db)
        .delete_lecture(&other, existing.id)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(CurriculumRepository::new(db)
        .find_lecture(existing.id)
        .await?
        .is_some());

    Ok(())
}
