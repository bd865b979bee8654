//! Course factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test courses owned by an instructor.
pub struct CourseFactory<'a> {
    db: &'a DatabaseConnection,
    instructor_id: i32,
    title: String,
    slug: String,
    description: String,
    price_cents: i64,
    currency: String,
    difficulty_id: Option<i32>,
    status: String,
}

impl<'a> CourseFactory<'a> {
    /// Defaults: title `"Course {id}"`, slug `"course-{id}"`, free, `usd`, `draft`.
    pub fn new(db: &'a DatabaseConnection, instructor_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            instructor_id,
            title: format!("Course {}", id),
            slug: format!("course-{}", id),
            description: "A course".to_string(),
            price_cents: 0,
            currency: "usd".to_string(),
            difficulty_id: None,
            status: "draft".to_string(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = price_cents;
        self
    }

    pub fn difficulty_id(mut self, difficulty_id: i32) -> Self {
        self.difficulty_id = Some(difficulty_id);
        self
    }

    /// Sets the status (`draft`, `published` or `archived`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub async fn build(self) -> Result<entity::course::Model, DbErr> {
        let now = Utc::now();
        let published_at = (self.status == "published").then_some(now);

        entity::course::ActiveModel {
            instructor_id: ActiveValue::Set(self.instructor_id),
            title: ActiveValue::Set(self.title),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set(self.description),
            price_cents: ActiveValue::Set(self.price_cents),
            currency: ActiveValue::Set(self.currency),
            difficulty_id: ActiveValue::Set(self.difficulty_id),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            published_at: ActiveValue::Set(published_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a free draft course for the instructor.
pub async fn create_course(
    db: &DatabaseConnection,
    instructor_id: i32,
) -> Result<entity::course::Model, DbErr> {
    CourseFactory::new(db, instructor_id).build().await
}
