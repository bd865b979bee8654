use super::*;

/// Tests adding a lecture to an owned section.
///
/// Expected: Ok with the sanitized title and the given duration
#[tokio::test]
async fn adds_lecture() -> Result<(), AppError> {
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
        .create_section(&instructor, course.id, "Getting started")
        .await?;
    let created = service
        .create_lecture(&instructor, section.id, lecture("  <b>Hello</b> world ", true))
        .await?;

    assert_eq!(created.section_id, section.id);
    assert_eq!(created.title, "Hello world");
    assert_eq!(created.duration_seconds, 120);
    assert!(created.is_preview);

    Ok(())
}

/// Tests referencing an upload that does not exist.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_unknown_video_upload() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let section = factory::create_section(db, course.id).await?;
    let instructor = User::from_entity(instructor)?;

    let params = LectureParams {
        video_upload_id: Some("missing".to_string()),
        ..lecture("Video", false)
    };
    let result = CurriculumService::new(db)
        .create_lecture(&instructor, section.id, params)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests adding a lecture to another instructor's section.
///
/// Expected: Err(Forbidden)
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
    let other = User::from_entity(factory::create_instructor(db).await?)?;

    let result = CurriculumService::new(db)
        .create_lecture(&other, section.id, lecture("Sneaky", false))
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests attaching a completed upload owned by the instructor.
///
/// Verifies that the lecture references the upload, while an upload of another user or
/// one still in progress is refused.
///
/// Expected: Ok with the upload id, Err(BadRequest) for the unusable uploads
#[tokio::test]
async fn accepts_own_completed_upload() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let other = factory::create_instructor(db).await?;
    let course = factory::create_course(db, instructor.id).await?;
    let section = factory::create_section(db, course.id).await?;
    let instructor = User::from_entity(instructor)?;

    let uploads = UploadRepository::new(db);
    for (id, user_id) in [("own", instructor.id), ("theirs", other.id), ("partial", instructor.id)] {
        uploads
            .create(
                id.to_string(),
                user_id,
                "intro.mp4".to_string(),
                2048,
                1024,
                2,
                "a".repeat(64),
            )
            .await?;
    }
    uploads.mark_completed("own", "uploads/own/intro.mp4".to_string()).await?;
    uploads.mark_completed("theirs", "uploads/theirs/intro.mp4".to_string()).await?;

    let service = CurriculumService::new(db);
    let created = service
        .create_lecture(
            &instructor,
            section.id,
            LectureParams {
                video_upload_id: Some("own".to_string()),
                ..lecture("Video", false)
            },
        )
        .await?;
    assert_eq!(created.video_upload_id.as_deref(), Some("own"));

    for upload_id in ["theirs", "partial"] {
        let result = service
            .create_lecture(
                &instructor,
                section.id,
                LectureParams {
                    video_upload_id: Some(upload_id.to_string()),
                    ..lecture("Video", false)
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))), "{upload_id}");
    }

    Ok(())
}
