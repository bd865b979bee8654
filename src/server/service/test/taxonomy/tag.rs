use super::*;

/// Tests creating a tag.
///
/// Expected: Ok with a slug derived from the name
#[tokio::test]
async fn creates_tag_with_slug() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;

    let tag = TaxonomyService::new(db)
        .create_tag(&admin, "Web Development")
        .await?;

    assert_eq!(tag.name, "Web Development");
    assert_eq!(tag.slug, "web-development");

    Ok(())
}

/// Tests tag names that differ only in case.
///
/// Expected: Err(Conflict)
#[tokio::test]
async fn rejects_case_insensitive_duplicate() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let service = TaxonomyService::new(db);

    service.create_tag(&admin, "Rust").await?;
    let result = service.create_tag(&admin, "rust").await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests renaming a tag to its own name with different case.
///
/// Verifies that the tag does not conflict with itself.
///
/// Expected: Ok with the new spelling
#[tokio::test]
async fn rename_ignores_own_name() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = User::from_entity(factory::create_admin(db).await?)?;
    let service = TaxonomyService::new(db);

    let tag = service.create_tag(&admin, "rust").await?;
    let renamed = service.rename_tag(&admin, tag.id, "Rust").await?;

    assert_eq!(renamed.id, tag.id);
    assert_eq!(renamed.name, "Rust");

    Ok(())
}

/// Tests assigning and removing a tag on an owned course.
///
/// Expected: the course lists the tag after assigning and not after removing
#[tokio::test]
async fn assigns_and_unassigns_tag() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let tag = factory::create_tag(db).await?;
    let instructor = User::from_entity(instructor)?;
    let service = TaxonomyService::new(db);

    let tagged = service.assign_tag(&instructor, course.id, tag.id).await?;
    assert_eq!(tagged.tags.iter().map(|t| t.id).collect::<Vec<_>>(), vec![tag.id]);

    let untagged = service.unassign_tag(&instructor, course.id, tag.id).await?;
    assert!(untagged.tags.is_empty());

    Ok(())
}

/// Tests tagging another instructor's course.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn assign_requires_course_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_instructor(db).await?;
    let course = factory::create_course(db, owner.id).await?;
    let tag = factory::create_tag(db).await?;
    let other = User::from_entity(factory::create_instructor(db).await?)?;

    let result = TaxonomyService::new(db)
        .assign_tag(&other, course.id, tag.id)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}
