//! Sections and lectures of a course.

use std::collections::HashSet;

use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::{curriculum::CurriculumRepository, upload::UploadRepository},
    error::AppError,
    model::{
        audit::AuditEntry,
        course::{Course, Curriculum, Lecture, LectureParams, Section},
        upload::UploadStatus,
        user::User,
    },
    service::{audit::AuditService, course::CourseService},
    util::validation::{require_text, sanitize_text},
};

const TITLE_MAX_LEN: usize = 200;

pub struct CurriculumService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CurriculumService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a section to a course the actor owns.
    pub async fn create_section(
        &self,
        actor: &User,
        course_id: i32,
        title: &str,
    ) -> Result<Section, AppError> {
        CourseService::new(self.db).get_owned(actor, course_id).await?;
        let title = require_text("Title", title, 1, TITLE_MAX_LEN)?;

        let section = CurriculumRepository::new(self.db)
            .create_section(course_id, title)
            .await?;

        self.audit(actor, "section.create", "section", section.id, course_id)
            .await?;

        Ok(section)
    }

    pub async fn rename_section(
        &self,
        actor: &User,
        section_id: i32,
        title: &str,
    ) -> Result<Section, AppError> {
        let section = self.get_owned_section(actor, section_id).await?;
        let title = require_text("Title", title, 1, TITLE_MAX_LEN)?;

        let updated = CurriculumRepository::new(self.db)
            .rename_section(section_id, title)
            .await?
            .ok_or_else(|| AppError::NotFound("Section not found".to_string()))?;

        self.audit(actor, "section.update", "section", section_id, section.course_id)
            .await?;

        Ok(updated)
    }

    /// Deletes a section together with its lectures.
    pub async fn delete_section(&self, actor: &User, section_id: i32) -> Result<(), AppError> {
        let section = self.get_owned_section(actor, section_id).await?;

        CurriculumRepository::new(self.db)
            .delete_section(section_id)
            .await?;

        self.audit(actor, "section.delete", "section", section_id, section.course_id)
            .await?;

        Ok(())
    }

    /// Reorders the sections of a course.
    ///
    /// # Arguments
    /// - `section_ids` - Every section id of the course, each exactly once, in the new order
    ///
    /// # Returns
    /// - `Ok(Vec<Section>)` - Sections in their new order
    /// - `Err(AppError::BadRequest)` - The ids are not a permutation of the course's sections
    pub async fn reorder_sections(
        &self,
        actor: &User,
        course_id: i32,
        section_ids: Vec<i32>,
    ) -> Result<Vec<Section>, AppError> {
        CourseService::new(self.db).get_owned(actor, course_id).await?;
        let repo = CurriculumRepository::new(self.db);

        let existing: HashSet<i32> = repo
            .get_sections(course_id)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();
        let requested: HashSet<i32> = section_ids.iter().copied().collect();

        if requested.len() != section_ids.len() || requested != existing {
            return Err(AppError::BadRequest(
                "Section order must list every section of the course exactly once".to_string(),
            ));
        }

        repo.set_section_positions(&section_ids).await?;

        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(actor.id), "section.reorder", "course")
                    .entity_id(course_id)
                    .details(json!({ "section_ids": section_ids })),
            )
            .await?;

        Ok(repo.get_sections(course_id).await?)
    }

    /// Adds a lecture to a section.
    ///
    /// # Returns
    /// - `Ok(Lecture)` - The new lecture
    /// - `Err(AppError::BadRequest)` - Invalid fields or unusable video upload
    pub async fn create_lecture(
        &self,
        actor: &User,
        section_id: i32,
        params: LectureParams,
    ) -> Result<Lecture, AppError> {
        let section = self.get_owned_section(actor, section_id).await?;
        let params = self.validate_lecture(actor, params).await?;

        let lecture = CurriculumRepository::new(self.db)
            .create_lecture(section_id, params)
            .await?;

        self.audit(actor, "lecture.create", "lecture", lecture.id, section.course_id)
            .await?;

        Ok(lecture)
    }

    pub async fn update_lecture(
        &self,
        actor: &User,
        lecture_id: i32,
        params: LectureParams,
    ) -> Result<Lecture, AppError> {
        let (_, section) = self.get_owned_lecture(actor, lecture_id).await?;
        let params = self.validate_lecture(actor, params).await?;

        let lecture = CurriculumRepository::new(self.db)
            .update_lecture(lecture_id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Lecture not found".to_string()))?;

        self.audit(actor, "lecture.update", "lecture", lecture_id, section.course_id)
            .await?;

        Ok(lecture)
    }

    pub async fn delete_lecture(&self, actor: &User, lecture_id: i32) -> Result<(), AppError> {
        let (_, section) = self.get_owned_lecture(actor, lecture_id).await?;

        CurriculumRepository::new(self.db)
            .delete_lecture(lecture_id)
            .await?;

        self.audit(actor, "lecture.delete", "lecture", lecture_id, section.course_id)
            .await?;

        Ok(())
    }

    /// Course with ordered sections and lectures as seen by `viewer`.
    ///
    /// Non-preview lectures are redacted unless the viewer owns the course, is an admin or
    /// holds an active enrollment.
    pub async fn get_curriculum(
        &self,
        viewer: Option<&User>,
        course_id: i32,
    ) -> Result<Curriculum, AppError> {
        let course_service = CourseService::new(self.db);
        let course = course_service.get(viewer, course_id).await?;
        let full_access = course_service.has_full_access(viewer, &course).await?;

        let sections = self.load_sections(&course, full_access).await?;

        Ok(Curriculum {
            course,
            full_access,
            sections,
        })
    }

    async fn load_sections(
        &self,
        course: &Course,
        full_access: bool,
    ) -> Result<Vec<(Section, Vec<Lecture>)>, AppError> {
        let repo = CurriculumRepository::new(self.db);

        let sections = repo.get_sections(course.id).await?;
        let lectures = repo
            .get_lectures(sections.iter().map(|s| s.id).collect())
            .await?;

        Ok(sections
            .into_iter()
            .map(|section| {
                let section_lectures = lectures
                    .iter()
                    .filter(|l| l.section_id == section.id)
                    .cloned()
                    .map(|l| if full_access { l } else { l.redacted() })
                    .collect();
                (section, section_lectures)
            })
            .collect())
    }

    async fn get_owned_section(&self, actor: &User, section_id: i32) -> Result<Section, AppError> {
        let section = CurriculumRepository::new(self.db)
            .find_section(section_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Section not found".to_string()))?;

        CourseService::new(self.db)
            .get_owned(actor, section.course_id)
            .await?;

        Ok(section)
    }

    async fn get_owned_lecture(
        &self,
        actor: &User,
        lecture_id: i32,
    ) -> Result<(Lecture, Section), AppError> {
        let lecture = CurriculumRepository::new(self.db)
            .find_lecture(lecture_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lecture not found".to_string()))?;

        let section = self.get_owned_section(actor, lecture.section_id).await?;

        Ok((lecture, section))
    }

    async fn validate_lecture(
        &self,
        actor: &User,
        params: LectureParams,
    ) -> Result<LectureParams, AppError> {
        let title = require_text("Title", &params.title, 1, TITLE_MAX_LEN)?;

        if params.duration_seconds < 0 {
            return Err(AppError::BadRequest(
                "Duration cannot be negative".to_string(),
            ));
        }

        if params.position.is_some_and(|p| p < 0) {
            return Err(AppError::BadRequest("Position cannot be negative".to_string()));
        }

        if let Some(upload_id) = params.video_upload_id.as_deref() {
            let upload = UploadRepository::new(self.db).find_by_id(upload_id).await?;
            let usable = upload
                .is_some_and(|u| u.user_id == actor.id && u.status == UploadStatus::Completed);
            if !usable {
                return Err(AppError::BadRequest(format!(
                    "Upload '{}' is not a completed upload of yours",
                    upload_id
                )));
            }
        }

        Ok(LectureParams {
            title,
            content: params
                .content
                .map(|c| sanitize_text(&c))
                .filter(|c| !c.is_empty()),
            ..params
        })
    }

    async fn audit(
        &self,
        actor: &User,
        action: &str,
        entity_type: &str,
        entity_id: i32,
        course_id: i32,
    ) -> Result<(), AppError> {
        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(actor.id), action, entity_type)
                    .entity_id(entity_id)
                    .details(json!({ "course_id": course_id })),
            )
            .await?;
        Ok(())
    }
}
