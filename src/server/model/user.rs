//! User domain models and parameters.
//!
//! Users authenticate through the external OAuth2 provider and are identified by the
//! provider's subject id. The role decides what a user may do: students buy and take
//! courses, instructors author them, admins manage the platform.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::user::UserDto;

/// Role of a user on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Instructor => "instructor",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Role::Student),
            "instructor" => Some(Role::Instructor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Application user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Subject id assigned by the identity provider.
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Per-instructor commission override in basis points.
    pub commission_rate_bps: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(DbErr::Custom)` - The stored role is not a known role
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, DbErr> {
        let role = Role::parse(&entity.role)
            .ok_or_else(|| DbErr::Custom(format!("Unknown user role '{}'", entity.role)))?;

        Ok(Self {
            id: entity.id,
            external_id: entity.external_id,
            email: entity.email,
            name: entity.name,
            role,
            commission_rate_bps: entity.commission_rate_bps,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            name: self.name,
            role: self.role.as_str().to_string(),
            commission_rate_bps: self.commission_rate_bps,
            created_at: self.created_at,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether the user may author courses; admins can do everything instructors can.
    pub fn is_instructor(&self) -> bool {
        matches!(self.role, Role::Instructor | Role::Admin)
    }
}

/// Parameters for upserting a user after a successful OAuth2 login.
///
/// `role` is only written for new users unless `grant_admin` is set, so logging in
/// never demotes anyone.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    pub external_id: String,
    pub email: String,
    pub name: String,
    /// Set when the login used a valid bootstrap admin code.
    pub grant_admin: bool,
}
