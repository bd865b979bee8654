use super::*;

/// Tests the curriculum of a paid course seen by a visitor.
///
/// Verifies that preview lectures keep their content while other lectures are redacted.
///
/// Expected: full_access false, preview content kept, other content removed
#[tokio::test]
async fn redacts_non_preview_lectures_for_visitors() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let instructor = User::from_entity(instructor)?;
    let service = CurriculumService::new(db);

    let section = service.create_section(&instructor, course.id, "Intro").await?;
    service
        .create_lecture(&instructor, section.id, lecture("Preview", true))
        .await?;
    service
        .create_lecture(&instructor, section.id, lecture("Paid", false))
        .await?;
    CourseService::new(db)
        .publish(&instructor, course.id)
        .await?;

    let curriculum = service.get_curriculum(None, course.id).await?;

    assert!(!curriculum.full_access);
    assert_eq!(curriculum.sections.len(), 1);
    let lectures = &curriculum.sections[0].1;
    assert_eq!(lectures.len(), 2);
    let preview = lectures.iter().find(|l| l.title == "Preview").unwrap();
    let paid = lectures.iter().find(|l| l.title == "Paid").unwrap();
    assert_eq!(preview.content.as_deref(), Some("Notes"));
    assert!(paid.content.is_none());

    Ok(())
}

/// Tests the curriculum seen by an enrolled student.
///
/// Expected: full_access true and every lecture with content
#[tokio::test]
async fn enrolled_student_gets_full_content() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_commerce_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_published_course(db).await?;
    let student = factory::create_user(db).await?;
    factory::create_enrollment(db, student.id, course.id).await?;
    let student = User::from_entity(student)?;

    let curriculum = CurriculumService::new(db)
        .get_curriculum(Some(&student), course.id)
        .await?;

    assert!(curriculum.full_access);
    assert!(curriculum.sections[0].1.iter().all(|l| l.content.is_some()));

    Ok(())
}
