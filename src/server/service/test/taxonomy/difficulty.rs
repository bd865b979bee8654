use super::*;

/// Tests creating a difficulty level.
///
/// Expected: Ok with the given level, display name and order
#[tokio::test]
async fn creates_level() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;

    let created = TaxonomyService::new(db)
        .create_difficulty(&admin, level("beginner", 1))
        .await?;

    assert_eq!(created.level, "beginner");
    assert_eq!(created.display_name, "BEGINNER");
    assert_eq!(created.sort_order, 1);

    Ok(())
}

/// Tests malformed and duplicate levels.
///
/// Expected: Err(BadRequest) for an uppercase level, Err(Conflict) for a duplicate
#[tokio::test]
async fn validates_level() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let service = TaxonomyService::new(db);

    let malformed = service
        .create_difficulty(&admin, level("Expert Level", 3))
        .await;
    assert!(matches!(malformed, Err(AppError::BadRequest(_))));

    service.create_difficulty(&admin, level("expert", 3)).await?;
    let duplicate = service.create_difficulty(&admin, level("expert", 4)).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests deleting a level used by a course.
///
/// Expected: Err(Conflict) while in use, Ok once unused
#[tokio::test]
async fn delete_rejects_level_in_use() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let used = factory::difficulty::create_difficulty(db, "intermediate", 2).await?;
    let unused = factory::difficulty::create_difficulty(db, "advanced", 3).await?;
    let instructor = factory::create_instructor(db).await?;
    factory::course::CourseFactory::new(db, instructor.id)
        .difficulty_id(used.id)
        .build()
        .await?;
    let service = TaxonomyService::new(db);

    let result = service.delete_difficulty(&admin, used.id).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    service.delete_difficulty(&admin, unused.id).await?;
    assert_eq!(service.list_difficulties().await?.len(), 1);

    Ok(())
}
