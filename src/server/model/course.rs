//! Course authoring domain models and parameters.
//!
//! A course belongs to one instructor and is organised into ordered sections, each
//! holding ordered lectures. Courses move from `draft` to `published`, may be archived,
//! and archived courses may be published again.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::course::{
        CourseDto, CreateCourseDto, CurriculumDto, CurriculumSectionDto, LectureDto,
        LectureInputDto, SectionDto, UpdateCourseDto,
    },
    server::model::taxonomy::Tag,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseStatus {
    Draft,
    Published,
    Archived,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => "draft",
            CourseStatus::Published => "published",
            CourseStatus::Archived => "archived",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(CourseStatus::Draft),
            "published" => Some(CourseStatus::Published),
            "archived" => Some(CourseStatus::Archived),
            _ => None,
        }
    }
}

/// Course with its assigned tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: i32,
    pub instructor_id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price_cents: i64,
    pub currency: String,
    pub difficulty_id: Option<i32>,
    pub status: CourseStatus,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Course {
    /// Converts a course entity and its tags to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Course)` - Converted course
    /// - `Err(DbErr::Custom)` - The stored status is unknown
    pub fn from_entity(
        entity: entity::course::Model,
        tags: Vec<entity::tag::Model>,
    ) -> Result<Self, DbErr> {
        let status = CourseStatus::parse(&entity.status)
            .ok_or_else(|| DbErr::Custom(format!("Unknown course status '{}'", entity.status)))?;

        Ok(Self {
            id: entity.id,
            instructor_id: entity.instructor_id,
            title: entity.title,
            slug: entity.slug,
            description: entity.description,
            price_cents: entity.price_cents,
            currency: entity.currency,
            difficulty_id: entity.difficulty_id,
            status,
            tags: tags.into_iter().map(Tag::from_entity).collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            published_at: entity.published_at,
        })
    }

    pub fn into_dto(self) -> CourseDto {
        CourseDto {
            id: self.id,
            instructor_id: self.instructor_id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            price_cents: self.price_cents,
            currency: self.currency,
            difficulty_id: self.difficulty_id,
            status: self.status.as_str().to_string(),
            tags: self.tags.into_iter().map(Tag::into_dto).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            published_at: self.published_at,
        }
    }

    pub fn is_free(&self) -> bool {
        self.price_cents == 0
    }
}

/// Validated course fields used for both create and update.
#[derive(Debug, Clone)]
pub struct CourseFields {
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub currency: Option<String>,
    pub difficulty_id: Option<i32>,
}

impl From<CreateCourseDto> for CourseFields {
    fn from(dto: CreateCourseDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            price_cents: dto.price_cents,
            currency: dto.currency,
            difficulty_id: dto.difficulty_id,
        }
    }
}

impl From<UpdateCourseDto> for CourseFields {
    fn from(dto: UpdateCourseDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            price_cents: dto.price_cents,
            currency: dto.currency,
            difficulty_id: dto.difficulty_id,
        }
    }
}

/// Course row values after sanitization, ready to be written.
#[derive(Debug, Clone)]
pub struct CourseRecord {
    pub instructor_id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub price_cents: i64,
    pub currency: String,
    pub difficulty_id: Option<i32>,
}

/// Filters for the public course catalogue.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub tag_slug: Option<String>,
    pub difficulty_id: Option<i32>,
    pub instructor_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub position: i32,
}

impl Section {
    pub fn from_entity(entity: entity::section::Model) -> Self {
        Self {
            id: entity.id,
            course_id: entity.course_id,
            title: entity.title,
            position: entity.position,
        }
    }

    pub fn into_dto(self) -> SectionDto {
        SectionDto {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            position: self.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lecture {
    pub id: i32,
    pub section_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub video_upload_id: Option<String>,
    pub duration_seconds: i32,
    pub position: i32,
    pub is_preview: bool,
}

impl Lecture {
    pub fn from_entity(entity: entity::lecture::Model) -> Self {
        Self {
            id: entity.id,
            section_id: entity.section_id,
            title: entity.title,
            content: entity.content,
            video_upload_id: entity.video_upload_id,
            duration_seconds: entity.duration_seconds,
            position: entity.position,
            is_preview: entity.is_preview,
        }
    }

    pub fn into_dto(self) -> LectureDto {
        LectureDto {
            id: self.id,
            section_id: self.section_id,
            title: self.title,
            content: self.content,
            video_upload_id: self.video_upload_id,
            duration_seconds: self.duration_seconds,
            position: self.position,
            is_preview: self.is_preview,
        }
    }

    /// Drops content and video of a non-preview lecture.
    pub fn redacted(mut self) -> Self {
        if !self.is_preview {
            self.content = None;
            self.video_upload_id = None;
        }
        self
    }
}

/// Lecture fields supplied by the author.
#[derive(Debug, Clone)]
pub struct LectureParams {
    pub title: String,
    pub content: Option<String>,
    pub video_upload_id: Option<String>,
    pub duration_seconds: i32,
    /// Appended after the last lecture when `None`.
    pub position: Option<i32>,
    pub is_preview: bool,
}

impl From<LectureInputDto> for LectureParams {
    fn from(dto: LectureInputDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
            video_upload_id: dto.video_upload_id,
            duration_seconds: dto.duration_seconds,
            position: dto.position,
            is_preview: dto.is_preview,
        }
    }
}

/// Course with its ordered sections and lectures.
#[derive(Debug, Clone)]
pub struct Curriculum {
    pub course: Course,
    /// Whether the viewer may see non-preview lecture content.
    pub full_access: bool,
    pub sections: Vec<(Section, Vec<Lecture>)>,
}

impl Curriculum {
    pub fn into_dto(self) -> CurriculumDto {
        CurriculumDto {
            course: self.course.into_dto(),
            full_access: self.full_access,
            sections: self
                .sections
                .into_iter()
                .map(|(section, lectures)| CurriculumSectionDto {
                    section: section.into_dto(),
                    lectures: lectures.into_iter().map(Lecture::into_dto).collect(),
                })
                .collect(),
        }
    }
}
