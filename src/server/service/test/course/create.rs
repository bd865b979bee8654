use super::*;

/// Tests creating a course.
///
/// Verifies that the course starts as a draft owned by the actor with a slug derived from
/// the title and the default currency.
///
/// Expected: Ok with draft status and slug `intro-to-rust`
#[tokio::test]
async fn creates_draft_with_slug() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = User::from_entity(factory::create_instructor(db).await?)?;

    let course = CourseService::new(db)
        .create(&instructor, fields("Intro to Rust!", 4999))
        .await?;

    assert_eq!(course.status, CourseStatus::Draft);
    assert_eq!(course.instructor_id, instructor.id);
    assert_eq!(course.slug, "intro-to-rust");
    assert_eq!(course.currency, "usd");
    assert!(course.published_at.is_none());

    Ok(())
}

/// Tests two courses with the same title.
///
/// Expected: the second slug gets a `-2` suffix
#[tokio::test]
async fn suffixes_duplicate_slug() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = User::from_entity(factory::create_instructor(db).await?)?;
    let service = CourseService::new(db);

    let first = service.create(&instructor, fields("Async Rust", 0)).await?;
    let second = service.create(&instructor, fields("Async Rust", 0)).await?;

    assert_eq!(first.slug, "async-rust");
    assert_eq!(second.slug, "async-rust-2");

    Ok(())
}

/// Tests invalid course fields.
///
/// Verifies that an empty title, a negative price, a bad currency and an unknown
/// difficulty are all rejected.
///
/// Expected: Err(BadRequest) for each
#[tokio::test]
async fn rejects_invalid_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = User::from_entity(factory::create_instructor(db).await?)?;
    let service = CourseService::new(db);

    let bad_currency = CourseFields {
        currency: Some("dollars".to_string()),
        ..fields("Valid", 100)
    };
    let unknown_difficulty = CourseFields {
        difficulty_id: Some(999),
        ..fields("Valid", 100)
    };

    for input in [
        fields("   ", 100),
        fields("Valid", -1),
        bad_currency,
        unknown_difficulty,
    ] {
        let result = service.create(&instructor, input).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    Ok(())
}

/// Tests updating another instructor's course.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn update_requires_owner() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_instructor(db).await?;
    let course = factory::create_course(db, owner.id).await?;
    let other = User::from_entity(factory::create_instructor(db).await?)?;

    let result = CourseService::new(db)
        .update(&other, course.id, fields("Hijacked", 0))
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests an admin updating an instructor's course.
///
/// Verifies that the slug follows the new title and ownership is unchanged.
///
/// Expected: Ok with the new title and slug
#[tokio::test]
async fn admin_can_update_any_course() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_instructor(db).await?;
    let course = factory::create_course(db, owner.id).await?;
    let admin = User::from_entity(factory::create_admin(db).await?)?;

    let updated = CourseService::new(db)
        .update(&admin, course.id, fields("Renamed Course", 2500))
        .await?;

    assert_eq!(updated.title, "Renamed Course");
    assert_eq!(updated.slug, "renamed-course");
    assert_eq!(updated.price_cents, 2500);
    assert_eq!(updated.instructor_id, owner.id);

    Ok(())
}

/// Tests retitling a course so that its slug would not change.
///
/// Verifies that the course keeps its own slug, including a suffixed one, instead of
/// taking the next free suffix.
///
/// Expected: slugs `rust` and `rust-2` unchanged after the retitle
#[tokio::test]
async fn retitle_with_same_slug_keeps_slug() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = User::from_entity(factory::create_instructor(db).await?)?;
    let service = CourseService::new(db);

    let first = service.create(&instructor, fields("Rust", 0)).await?;
    let second = service.create(&instructor, fields("Rust", 0)).await?;

    let first = service
        .update(&instructor, first.id, fields("Rust!", 0))
        .await?;
    let second = service
        .update(&instructor, second.id, fields("Rust?", 0))
        .await?;

    assert_eq!(first.title, "Rust!");
    assert_eq!(first.slug, "rust");
    assert_eq!(second.slug, "rust-2");

    Ok(())
}
