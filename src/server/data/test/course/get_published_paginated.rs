use super::*;

/// Tests the catalogue only lists published courses.
///
/// Verifies that draft and archived courses are excluded.
///
/// Expected: Ok with the single published course
#[tokio::test]
async fn excludes_unpublished_courses() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let published = factory::course::CourseFactory::new(db, instructor.id)
        .status("published")
        .build()
        .await?;
    factory::create_course(db, instructor.id).await?;
    factory::course::CourseFactory::new(db, instructor.id)
        .status("archived")
        .build()
        .await?;

    let page = CourseRepository::new(db)
        .get_published_paginated(CourseFilter::default(), PageRequest::new(0, 10))
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, published.id);
    assert_eq!(page.items[0].status, CourseStatus::Published);

    Ok(())
}

/// Tests filtering the catalogue by tag slug.
///
/// Verifies that only courses linked to the tag are returned, with their tags attached.
///
/// Expected: Ok with the tagged course only
#[tokio::test]
async fn filters_by_tag_slug() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let instructor = factory::create_instructor(db).await?;
    let tagged = factory::course::CourseFactory::new(db, instructor.id)
        .status("published")
        .build()
        .await?;
    factory::course::CourseFactory::new(db, instructor.id)
        .status("published")
        .build()
        .await?;
    let tag = factory::tag::create_tag_named(db, "Rust", "rust").await?;
    factory::tag::tag_course(db, tagged.id, tag.id).await?;

    let page = CourseRepository::new(db)
        .get_published_paginated(
            CourseFilter {
                tag_slug: Some("rust".to_string()),
                ..Default::default()
            },
            PageRequest::new(0, 10),
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, tagged.id);
    assert_eq!(page.items[0].tags.len(), 1);
    assert_eq!(page.items[0].tags[0].slug, "rust");

    Ok(())
}

/// Tests filtering by a tag slug that does not exist.
///
/// Expected: Ok with an empty page
#[tokio::test]
async fn unknown_tag_yields_empty_page() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::helpers::create_published_course(db).await?;

    let page = CourseRepository::new(db)
        .get_published_paginated(
            CourseFilter {
                tag_slug: Some("missing".to_string()),
                ..Default::default()
            },
            PageRequest::new(0, 10),
        )
        .await?;

    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());

    Ok(())
}

/// Tests filtering by instructor.
///
/// Expected: Ok with courses of the given instructor only
#[tokio::test]
async fn filters_by_instructor() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (instructor, course) = factory::helpers::create_published_course(db).await?;
    factory::helpers::create_published_course(db).await?;

    let page = CourseRepository::new(db)
        .get_published_paginated(
            CourseFilter {
                instructor_id: Some(instructor.id),
                ..Default::default()
            },
            PageRequest::new(0, 10),
        )
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, course.id);

    Ok(())
}
