//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique values across factories.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates an instructor and a published course with one section and one lecture.
///
/// The course costs 10000 cents so it can be used for checkout and commission tests.
///
/// # Returns
/// - `Ok((instructor, course))` - The created instructor and course
/// - `Err(DbErr)` - Database error during creation
pub async fn create_published_course(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::course::Model), DbErr> {
    let instructor = crate::factory::user::create_instructor(db).await?;
    let course = crate::factory::course::CourseFactory::new(db, instructor.id)
        .price_cents(10_000)
        .status("published")
        .build()
        .await?;
    let section = crate::factory::section::create_section(db, course.id).await?;
    crate::factory::section::create_lecture(db, section.id).await?;

    Ok((instructor, course))
}
