//! Audit trail and security event models.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::model::audit::{AuditLogDto, SecurityEventDto};

#[derive(Debug, Clone, PartialEq)]
pub struct AuditLog {
    pub id: i32,
    pub actor_id: Option<i32>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn from_entity(entity: entity::audit_log::Model) -> Self {
        Self {
            id: entity.id,
            actor_id: entity.actor_id,
            action: entity.action,
            entity_type: entity.entity_type,
            entity_id: entity.entity_id,
            details: entity.details,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> AuditLogDto {
        AuditLogDto {
            id: self.id,
            actor_id: self.actor_id,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            details: self.details,
            created_at: self.created_at,
        }
    }
}

/// A single audit entry to record.
///
/// # Example
///
/// ```rust,ignore
/// AuditEntry::new(Some(user.id), "course.publish", "course")
///     .entity_id(course.id)
///     .details(json!({ "slug": course.slug }));
/// ```
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub actor_id: Option<i32>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub details: Option<Value>,
}

impl AuditEntry {
    pub fn new(actor_id: Option<i32>, action: &str, entity_type: &str) -> Self {
        Self {
            actor_id,
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: None,
            details: None,
        }
    }

    pub fn entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

pub mod event_type {
    pub const LOGIN_SUCCESS: &str = "login_success";
    pub const CSRF_FAILURE: &str = "csrf_failure";
    pub const ACCESS_DENIED: &str = "access_denied";
    pub const WEBHOOK_SIGNATURE_INVALID: &str = "webhook_signature_invalid";
    pub const ADMIN_BOOTSTRAP: &str = "admin_bootstrap";
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecurityEvent {
    pub id: i32,
    pub event_type: String,
    pub severity: String,
    pub user_id: Option<i32>,
    pub ip_address: Option<String>,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SecurityEvent {
    pub fn from_entity(entity: entity::security_event::Model) -> Self {
        Self {
            id: entity.id,
            event_type: entity.event_type,
            severity: entity.severity,
            user_id: entity.user_id,
            ip_address: entity.ip_address,
            details: entity.details,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> SecurityEventDto {
        SecurityEventDto {
            id: self.id,
            event_type: self.event_type,
            severity: self.severity,
            user_id: self.user_id,
            ip_address: self.ip_address,
            details: self.details,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewSecurityEvent {
    pub event_type: &'static str,
    pub severity: Severity,
    pub user_id: Option<i32>,
    pub ip_address: Option<String>,
    pub details: Option<String>,
}

impl NewSecurityEvent {
    pub fn new(event_type: &'static str, severity: Severity) -> Self {
        Self {
            event_type,
            severity,
            user_id: None,
            ip_address: None,
            details: None,
        }
    }

    pub fn user(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn ip(mut self, ip_address: Option<String>) -> Self {
        self.ip_address = ip_address;
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Filters for listing audit entries.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub actor_id: Option<i32>,
    pub entity_type: Option<String>,
}

/// Filters for listing security events.
#[derive(Debug, Clone, Default)]
pub struct SecurityEventFilter {
    pub event_type: Option<String>,
    pub severity: Option<String>,
}
