//! Enrollment domain model.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::enrollment::EnrollmentDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentStatus {
    Active,
    /// Removed by the student or revoked after a full refund.
    Revoked,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Revoked => "revoked",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(EnrollmentStatus::Active),
            "revoked" => Some(EnrollmentStatus::Revoked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    /// Purchase that granted access, `None` for free courses.
    pub transaction_id: Option<i32>,
    pub status: EnrollmentStatus,
    pub progress_percent: i32,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    pub fn from_entity(entity: entity::enrollment::Model) -> Result<Self, DbErr> {
        let status = EnrollmentStatus::parse(&entity.status).ok_or_else(|| {
            DbErr::Custom(format!("Unknown enrollment status '{}'", entity.status))
        })?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            course_id: entity.course_id,
            transaction_id: entity.transaction_id,
            status,
            progress_percent: entity.progress_percent,
            enrolled_at: entity.enrolled_at,
            completed_at: entity.completed_at,
        })
    }

    pub fn into_dto(self) -> EnrollmentDto {
        EnrollmentDto {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            transaction_id: self.transaction_id,
            status: self.status.as_str().to_string(),
            progress_percent: self.progress_percent,
            enrolled_at: self.enrolled_at,
            completed_at: self.completed_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == EnrollmentStatus::Active
    }
}
