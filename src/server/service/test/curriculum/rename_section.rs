use super::*;

/// Tests renaming a section of an owned course.
///
/// Expected: Ok with the sanitized title and the position unchanged
#[tokio::test]
async fn renames_section() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let instructor = User::from_entity(instructor)?;
    let service = CurriculumService::new(db);

    let section = service
        .create_section(&instructor, course.id, "Basics")
        .await?;
    let renamed = service
        .rename_section(&instructor, section.id, " <em>Fundamentals</em> ")
        .await?;

    assert_eq!(renamed.id, section.id);
    assert_eq!(renamed.title, "Fundamentals");
    assert_eq!(renamed.position, section.position);

    Ok(())
}

/// Tests invalid section renames.
///
/// Verifies that an empty title is refused, as is renaming another instructor's section
/// or one that does not exist.
///
/// Expected: Err(BadRequest), Err(Forbidden) and Err(NotFound)
#[tokio::test]
async fn rejects_invalid_rename() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_instructor(db).await?;
    let course = factory::create_course(db, owner.id).await?;
    let section = factory::create_section(db, course.id).await?;
    let owner = User::from_entity(owner)?;
    let other = User::from_entity(factory::create_instructor(db).await?)?;
    let service = CurriculumService::new(db);

    let empty = service.rename_section(&owner, section.id, "   ").await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));

    let foreign = service.rename_section(&other, section.id, "Mine now").await;
    assert!(matches!(foreign, Err(AppError::Forbidden(_))));

    let missing = service.rename_section(&owner, section.id + 100, "Ghost").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}
