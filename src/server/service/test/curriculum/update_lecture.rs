use super::*;

/// Tests editing a lecture.
///
/// Verifies that every field is replaced and that a missing position keeps the current
/// one.
///
/// Expected: Ok with the new fields and the original position
#[tokio::test]
async fn updates_lecture_fields() -> Result<(), AppError> {
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

    let updated = CurriculumService::new(db)
        .update_lecture(
            &instructor,
            existing.id,
            LectureParams {
                content: Some("<script>x</script>Updated notes".to_string()),
                duration_seconds: 600,
                ..lecture("Ownership", true)
            },
        )
        .await?;

    assert_eq!(updated.id, existing.id);
    assert_eq!(updated.title, "Ownership");
    assert_eq!(updated.duration_seconds, 600);
    assert!(updated.is_preview);
    assert_eq!(updated.position, existing.position);
    assert!(!updated.content.unwrap_or_default().contains("<script>"));

    Ok(())
}

/// Tests invalid lecture edits.
///
/// Verifies that a negative duration is refused, as is editing another instructor's
/// lecture or one that does not exist.
///
/// Expected: Err(BadRequest), Err(Forbidden) and Err(NotFound)
#[tokio::test]
async fn rejects_invalid_update() -> Result<(), AppError> {
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
    let owner = User::from_entity(owner)?;
    let other = User::from_entity(factory::create_instructor(db).await?)?;
    let service = CurriculumService::new(db);

    let negative = service
        .update_lecture(
            &owner,
            existing.id,
            LectureParams {
                duration_seconds: -1,
                ..lecture("Timing", false)
            },
        )
        .await;
    assert!(matches!(negative, Err(AppError::BadRequest(_))));

    let foreign = service
        .update_lecture(&other, existing.id, lecture("Mine now", false))
        .await;
    assert!(matches!(foreign, Err(AppError::Forbidden(_))));

    let missing = service
        .update_lecture(&owner, existing.id + 100, lecture("Ghost", false))
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}
