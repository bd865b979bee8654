//! Tag repository and course tag links.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::taxonomy::Tag;

pub struct TagRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TagRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: String, slug: String) -> Result<Tag, DbErr> {
        let entity = entity::tag::ActiveModel {
            name: ActiveValue::Set(name),
            slug: ActiveValue::Set(slug),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Tag::from_entity(entity))
    }

    pub async fn find_by_id(&self, tag_id: i32) -> Result<Option<Tag>, DbErr> {
        Ok(entity::prelude::Tag::find_by_id(tag_id)
            .one(self.db)
            .await?
            .map(Tag::from_entity))
    }

    /// All tags ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Tag>, DbErr> {
        Ok(entity::prelude::Tag::find()
            .order_by_asc(entity::tag::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .map(Tag::from_entity)
            .collect())
    }

    pub async fn rename(&self, tag_id: i32, name: String, slug: String) -> Result<Option<Tag>, DbErr> {
        let Some(existing) = entity::prelude::Tag::find_by_id(tag_id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::tag::ActiveModel = existing.into();
        active.name = ActiveValue::Set(name);
        active.slug = ActiveValue::Set(slug);

        Ok(Some(Tag::from_entity(active.update(self.db).await?)))
    }

    /// Deletes a tag and unlinks it from every course.
    pub async fn delete(&self, tag_id: i32) -> Result<(), DbErr> {
        entity::prelude::CourseTag::delete_many()
            .filter(entity::course_tag::Column::TagId.eq(tag_id))
            .exec(self.db)
            .await?;

        entity::prelude::Tag::delete_by_id(tag_id).exec(self.db).await?;

        Ok(())
    }

    /// Links a tag to a course; linking twice is a no-op.
    pub async fn assign(&self, course_id: i32, tag_id: i32) -> Result<(), DbErr> {
        let existing = entity::prelude::CourseTag::find_by_id((course_id, tag_id))
            .one(self.db)
            .await?;

        if existing.is_none() {
            entity::course_tag::ActiveModel {
                course_id: ActiveValue::Set(course_id),
                tag_id: ActiveValue::Set(tag_id),
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    pub async fn unassign(&self, course_id: i32, tag_id: i32) -> Result<(), DbErr> {
        entity::prelude::CourseTag::delete_by_id((course_id, tag_id))
            .exec(self.db)
            .await?;
        Ok(())
    }
}
