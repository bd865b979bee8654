//! Tags and difficulty levels.

use regex::Regex;
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::sync::LazyLock;

use crate::server::{
    data::{course::CourseRepository, difficulty::DifficultyRepository, tag::TagRepository},
    error::AppError,
    model::{
        audit::AuditEntry,
        course::Course,
        taxonomy::{Difficulty, DifficultyParams, Tag},
        user::User,
    },
    service::{audit::AuditService, course::CourseService},
    util::validation::{require_text, sanitize_text, slugify},
};

static LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9_-]{1,50}$").unwrap_or_else(|e| panic!("invalid level regex: {e}"))
});

const TAG_NAME_MAX_LEN: usize = 50;
const DISPLAY_NAME_MAX_LEN: usize = 100;

pub struct TaxonomyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TaxonomyService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, AppError> {
        Ok(TagRepository::new(self.db).get_all().await?)
    }

    /// Creates a tag; names are unique ignoring case.
    ///
    /// # Returns
    /// - `Ok(Tag)` - New tag with a slug derived from the name
    /// - `Err(AppError::BadRequest)` - Empty or too long name
    /// - `Err(AppError::Conflict)` - Name or slug already taken
    pub async fn create_tag(&self, actor: &User, name: &str) -> Result<Tag, AppError> {
        let (name, slug) = self.tag_name_and_slug(name, None).await?;

        let tag = TagRepository::new(self.db).create(name, slug).await?;

        self.audit(actor, "tag.create", "tag", tag.id, json!({ "name": tag.name }))
            .await?;

        Ok(tag)
    }

    pub async fn rename_tag(&self, actor: &User, tag_id: i32, name: &str) -> Result<Tag, AppError> {
        let (name, slug) = self.tag_name_and_slug(name, Some(tag_id)).await?;

        let tag = TagRepository::new(self.db)
            .rename(tag_id, name, slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Tag not found".to_string()))?;

        self.audit(actor, "tag.update", "tag", tag.id, json!({ "name": tag.name }))
            .await?;

        Ok(tag)
    }

    /// Deletes a tag and removes it from every course.
    pub async fn delete_tag(&self, actor: &User, tag_id: i32) -> Result<(), AppError> {
        let repo = TagRepository::new(self.db);
        if repo.find_by_id(tag_id).await?.is_none() {
            return Err(AppError::NotFound("Tag not found".to_string()));
        }

        repo.delete(tag_id).await?;

        self.audit(actor, "tag.delete", "tag", tag_id, json!({})).await?;

        Ok(())
    }

    /// Adds a tag to a course the actor owns.
    pub async fn assign_tag(&self, actor: &User, course_id: i32, tag_id: i32) -> Result<Course, AppError> {
        self.change_course_tag(actor, course_id, tag_id, true).await
    }

    pub async fn unassign_tag(
        &self,
        actor: &User,
        course_id: i32,
        tag_id: i32,
    ) -> Result<Course, AppError> {
        self.change_course_tag(actor, course_id, tag_id, false).await
    }

    pub async fn list_difficulties(&self) -> Result<Vec<Difficulty>, AppError> {
        Ok(DifficultyRepository::new(self.db).get_all().await?)
    }

    /// Creates a difficulty level.
    ///
    /// # Returns
    /// - `Ok(Difficulty)` - New level
    /// - `Err(AppError::BadRequest)` - Level is not a lowercase identifier, or bad display name
    /// - `Err(AppError::Conflict)` - Level already exists
    pub async fn create_difficulty(
        &self,
        actor: &User,
        params: DifficultyParams,
    ) -> Result<Difficulty, AppError> {
        let params = self.validate_difficulty(params, None).await?;

        let difficulty = DifficultyRepository::new(self.db).create(params).await?;

        self.audit(
            actor,
            "difficulty.create",
            "difficulty_configuration",
            difficulty.id,
            json!({ "level": difficulty.level }),
        )
        .await?;

        Ok(difficulty)
    }

    pub async fn update_difficulty(
        &self,
        actor: &User,
        difficulty_id: i32,
        params: DifficultyParams,
    ) -> Result<Difficulty, AppError> {
        let params = self.validate_difficulty(params, Some(difficulty_id)).await?;

        let difficulty = DifficultyRepository::new(self.db)
            .update(difficulty_id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Difficulty not found".to_string()))?;

        self.audit(
            actor,
            "difficulty.update",
            "difficulty_configuration",
            difficulty.id,
            json!({ "level": difficulty.level }),
        )
        .await?;

        Ok(difficulty)
    }

    /// Deletes a difficulty level that no course uses.
    ///
    /// # Returns
    /// - `Ok(())` - Deleted
    /// - `Err(AppError::NotFound)` - No such level
    /// - `Err(AppError::Conflict)` - Courses still reference it
    pub async fn delete_difficulty(&self, actor: &User, difficulty_id: i32) -> Result<(), AppError> {
        let repo = DifficultyRepository::new(self.db);
        if repo.find_by_id(difficulty_id).await?.is_none() {
            return Err(AppError::NotFound("Difficulty not found".to_string()));
        }

        let in_use = CourseRepository::new(self.db)
            .count_by_difficulty(difficulty_id)
            .await?;
        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "Difficulty is used by {} course(s)",
                in_use
            )));
        }

        repo.delete(difficulty_id).await?;

        self.audit(
            actor,
            "difficulty.delete",
            "difficulty_configuration",
            difficulty_id,
            json!({}),
        )
        .await?;

        Ok(())
    }

    async fn change_course_tag(
        &self,
        actor: &User,
        course_id: i32,
        tag_id: i32,
        assign: bool,
    ) -> Result<Course, AppError> {
        let course_service = CourseService::new(self.db);
        course_service.get_owned(actor, course_id).await?;

        let repo = TagRepository::new(self.db);
        if repo.find_by_id(tag_id).await?.is_none() {
            return Err(AppError::NotFound("Tag not found".to_string()));
        }

        let action = if assign {
            repo.assign(course_id, tag_id).await?;
            "course.tag_assign"
        } else {
            repo.unassign(course_id, tag_id).await?;
            "course.tag_unassign"
        };

        self.audit(actor, action, "course", course_id, json!({ "tag_id": tag_id }))
            .await?;

        course_service.get_owned(actor, course_id).await
    }

    /// Validates a tag name and checks name and slug are free, ignoring `current`.
    async fn tag_name_and_slug(
        &self,
        name: &str,
        current: Option<i32>,
    ) -> Result<(String, String), AppError> {
        let name = require_text("Tag name", name, 1, TAG_NAME_MAX_LEN)?;
        let slug = slugify(&name);
        if slug.is_empty() {
            return Err(AppError::BadRequest(
                "Tag name must contain letters or digits".to_string(),
            ));
        }

        let lowered = name.to_lowercase();
        let taken = TagRepository::new(self.db)
            .get_all()
            .await?
            .into_iter()
            .filter(|t| Some(t.id) != current)
            .any(|t| t.name.to_lowercase() == lowered || t.slug == slug);
        if taken {
            return Err(AppError::Conflict(format!("Tag '{}' already exists", name)));
        }

        Ok((name, slug))
    }

    async fn validate_difficulty(
        &self,
        params: DifficultyParams,
        current: Option<i32>,
    ) -> Result<DifficultyParams, AppError> {
        let level = params.level.trim().to_string();
        if !LEVEL_RE.is_match(&level) {
            return Err(AppError::BadRequest(
                "Level must be a lowercase identifier of letters, digits, '_' or '-'".to_string(),
            ));
        }

        let display_name = require_text("Display name", &params.display_name, 1, DISPLAY_NAME_MAX_LEN)?;

        if let Some(existing) = DifficultyRepository::new(self.db)
            .find_by_level(&level)
            .await?
        {
            if Some(existing.id) != current {
                return Err(AppError::Conflict(format!(
                    "Difficulty level '{}' already exists",
                    level
                )));
            }
        }

        Ok(DifficultyParams {
            level,
            display_name,
            sort_order: params.sort_order,
            description: params
                .description
                .map(|d| sanitize_text(&d))
                .filter(|d| !d.is_empty()),
        })
    }

    async fn audit(
        &self,
        actor: &User,
        action: &str,
        entity_type: &str,
        entity_id: i32,
        details: serde_json::Value,
    ) -> Result<(), AppError> {
        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(actor.id), action, entity_type)
                    .entity_id(entity_id)
                    .details(details),
            )
            .await?;
        Ok(())
    }
}
