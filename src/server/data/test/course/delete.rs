use super::*;

/// Tests deleting a course removes its curriculum and tag links.
///
/// Verifies that sections, lectures and course tags of the course are gone while the
/// tag itself remains.
///
/// Expected: Ok with no course, section, lecture or course tag rows left
#[tokio::test]
async fn deletes_curriculum_and_tag_links() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_course_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, course) = factory::helpers::create_published_course(db).await?;
    let tag = factory::create_tag(db).await?;
    factory::tag::tag_course(db, course.id, tag.id).await?;

    let repo = CourseRepository::new(db);
    repo.delete(course.id).await?;

    assert!(repo.find_by_id(course.id).await?.is_none());
    assert_eq!(entity::prelude::Section::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Lecture::find().count(db).await?, 0);
    assert_eq!(entity::prelude::CourseTag::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Tag::find().count(db).await?, 1);

    Ok(())
}
