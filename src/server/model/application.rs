//! Instructor application domain model.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::application::{InstructorApplicationDto, SubmitApplicationDto};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstructorApplication {
    pub id: i32,
    pub user_id: i32,
    pub bio: String,
    pub expertise: String,
    pub website: Option<String>,
    pub status: ApplicationStatus,
    pub rejection_reason: Option<String>,
    pub reviewed_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl InstructorApplication {
    pub fn from_entity(entity: entity::instructor_application::Model) -> Result<Self, DbErr> {
        let status = ApplicationStatus::parse(&entity.status).ok_or_else(|| {
            DbErr::Custom(format!("Unknown application status '{}'", entity.status))
        })?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            bio: entity.bio,
            expertise: entity.expertise,
            website: entity.website,
            status,
            rejection_reason: entity.rejection_reason,
            reviewed_by: entity.reviewed_by,
            created_at: entity.created_at,
            reviewed_at: entity.reviewed_at,
        })
    }

    pub fn into_dto(self) -> InstructorApplicationDto {
        InstructorApplicationDto {
            id: self.id,
            user_id: self.user_id,
            bio: self.bio,
            expertise: self.expertise,
            website: self.website,
            status: self.status.as_str().to_string(),
            rejection_reason: self.rejection_reason,
            reviewed_by: self.reviewed_by,
            created_at: self.created_at,
            reviewed_at: self.reviewed_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmitApplicationParams {
    pub bio: String,
    pub expertise: String,
    pub website: Option<String>,
}

impl From<SubmitApplicationDto> for SubmitApplicationParams {
    fn from(dto: SubmitApplicationDto) -> Self {
        Self {
            bio: dto.bio,
            expertise: dto.expertise,
            website: dto.website,
        }
    }
}

/// Outcome recorded when an admin reviews an application.
#[derive(Debug, Clone)]
pub struct ApplicationReview {
    pub status: ApplicationStatus,
    pub reviewed_by: i32,
    pub rejection_reason: Option<String>,
}
