use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::taxonomy::TagDto;

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct CourseDto {
    pub id: i32,
    pub instructor_id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price_cents: i64,
    pub currency: String,
    pub difficulty_id: Option<i32>,
    /// `draft`, `published` or `archived`.
    pub status: String,
    pub tags: Vec<TagDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateCourseDto {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub currency: Option<String>,
    pub difficulty_id: Option<i32>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UpdateCourseDto {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    pub currency: Option<String>,
    pub difficulty_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct SectionDto {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub position: i32,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SectionInputDto {
    pub title: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ReorderSectionsDto {
    /// Every section id of the course in the desired order.
    pub section_ids: Vec<i32>,
}

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct LectureDto {
    pub id: i32,
    pub section_id: i32,
    pub title: String,
    /// Withheld for non-preview lectures unless the caller may view the full course.
    pub content: Option<String>,
    pub video_upload_id: Option<String>,
    pub duration_seconds: i32,
    pub position: i32,
    pub is_preview: bool,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LectureInputDto {
    pub title: String,
    pub content: Option<String>,
    pub video_upload_id: Option<String>,
    #[serde(default)]
    pub duration_seconds: i32,
    pub position: Option<i32>,
    #[serde(default)]
    pub is_preview: bool,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CurriculumSectionDto {
    pub section: SectionDto,
    pub lectures: Vec<LectureDto>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CurriculumDto {
    pub course: CourseDto,
    /// Whether non-preview lecture content is included.
    pub full_access: bool,
    pub sections: Vec<CurriculumSectionDto>,
}
