//! Applications from students who want to become instructors.

use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::{application::ApplicationRepository, user::UserRepository},
    error::AppError,
    model::{
        application::{
            ApplicationReview, ApplicationStatus, InstructorApplication, SubmitApplicationParams,
        },
        audit::AuditEntry,
        pagination::{PageRequest, Paginated},
        user::{Role, User},
    },
    service::audit::AuditService,
    util::validation::{require_text, sanitize_text},
};

const BIO_MAX_LEN: usize = 5000;
const EXPERTISE_MAX_LEN: usize = 500;
const WEBSITE_MAX_LEN: usize = 255;

pub struct ApplicationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submits an application for the instructor role.
    ///
    /// # Returns
    /// - `Ok(InstructorApplication)` - Pending application
    /// - `Err(AppError::BadRequest)` - Missing bio or expertise, or the user already teaches
    /// - `Err(AppError::Conflict)` - A pending application exists
    pub async fn submit(
        &self,
        user: &User,
        params: SubmitApplicationParams,
    ) -> Result<InstructorApplication, AppError> {
        if user.role != Role::Student {
            return Err(AppError::BadRequest(
                "Only students can apply to become instructors".to_string(),
            ));
        }

        let bio = require_text("Bio", &params.bio, 1, BIO_MAX_LEN)?;
        let expertise = require_text("Expertise", &params.expertise, 1, EXPERTISE_MAX_LEN)?;
        let website = params
            .website
            .map(|w| sanitize_text(&w))
            .filter(|w| !w.is_empty());
        if website.as_ref().is_some_and(|w| w.len() > WEBSITE_MAX_LEN) {
            return Err(AppError::BadRequest(format!(
                "Website must be at most {} characters",
                WEBSITE_MAX_LEN
            )));
        }

        let repo = ApplicationRepository::new(self.db);
        if repo.has_pending(user.id).await? {
            return Err(AppError::Conflict(
                "You already have a pending application".to_string(),
            ));
        }

        let application = repo
            .create(
                user.id,
                SubmitApplicationParams {
                    bio,
                    expertise,
                    website,
                },
            )
            .await?;

        tracing::info!(
            application_id = application.id,
            user_id = user.id,
            "Instructor application submitted"
        );

        self.audit(user, "application.submit", application.id, json!({}))
            .await?;

        Ok(application)
    }

    /// Approves a pending application and promotes a student applicant to instructor.
    pub async fn approve(&self, actor: &User, application_id: i32) -> Result<InstructorApplication, AppError> {
        let application = self
            .review(
                actor,
                application_id,
                ApplicationReview {
                    status: ApplicationStatus::Approved,
                    reviewed_by: actor.id,
                    rejection_reason: None,
                },
            )
            .await?;

        let users = UserRepository::new(self.db);
        let applicant = users
            .find_by_id(application.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Applicant not found".to_string()))?;

        // a role granted while the application was pending is never lowered
        if applicant.role == Role::Student {
            users.set_role(applicant.id, Role::Instructor).await?;
        }

        Ok(application)
    }

    /// Rejects a pending application; a reason is required.
    pub async fn reject(
        &self,
        actor: &User,
        application_id: i32,
        reason: &str,
    ) -> Result<InstructorApplication, AppError> {
        let reason = sanitize_text(reason);
        if reason.is_empty() {
            return Err(AppError::BadRequest(
                "A rejection reason is required".to_string(),
            ));
        }

        self.review(
            actor,
            application_id,
            ApplicationReview {
                status: ApplicationStatus::Rejected,
                reviewed_by: actor.id,
                rejection_reason: Some(reason),
            },
        )
        .await
    }

    /// Applications in submission order, optionally filtered by status.
    pub async fn list(
        &self,
        status: Option<ApplicationStatus>,
        page: PageRequest,
    ) -> Result<Paginated<InstructorApplication>, AppError> {
        Ok(ApplicationRepository::new(self.db)
            .get_filtered_paginated(status, page)
            .await?)
    }

    pub async fn list_own(&self, user: &User) -> Result<Vec<InstructorApplication>, AppError> {
        Ok(ApplicationRepository::new(self.db)
            .get_by_user(user.id)
            .await?)
    }

    async fn review(
        &self,
        actor: &User,
        application_id: i32,
        review: ApplicationReview,
    ) -> Result<InstructorApplication, AppError> {
        let repo = ApplicationRepository::new(self.db);

        let application = repo
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        if application.status != ApplicationStatus::Pending {
            return Err(AppError::BadRequest(format!(
                "Application is already {}",
                application.status.as_str()
            )));
        }

        let status = review.status;
        let reviewed = repo
            .review(application_id, review)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        tracing::info!(application_id, status = status.as_str(), "Instructor application reviewed");

        self.audit(
            actor,
            &format!("application.{}", status.as_str()),
            application_id,
            json!({ "user_id": reviewed.user_id }),
        )
        .await?;

        Ok(reviewed)
    }

    async fn audit(
        &self,
        actor: &User,
        action: &str,
        application_id: i32,
        details: serde_json::Value,
    ) -> Result<(), AppError> {
        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(actor.id), action, "instructor_application")
                    .entity_id(application_id)
                    .details(details),
            )
            .await?;
        Ok(())
    }
}
