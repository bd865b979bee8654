//! Security-relevant events such as failed logins and rejected webhooks.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::security_event::SecurityEventRepository,
    error::AppError,
    model::{
        audit::{NewSecurityEvent, SecurityEvent, SecurityEventFilter, Severity},
        pagination::{PageRequest, Paginated},
    },
};

pub struct SecurityEventService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SecurityEventService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a security event, logging anything above `info` as a warning.
    pub async fn record(&self, event: NewSecurityEvent) -> Result<SecurityEvent, AppError> {
        if event.severity != Severity::Info {
            tracing::warn!(
                event_type = event.event_type,
                severity = event.severity.as_str(),
                user_id = ?event.user_id,
                ip = ?event.ip_address,
                "Security event: {}",
                event.details.as_deref().unwrap_or("")
            );
        }

        Ok(SecurityEventRepository::new(self.db).create(event).await?)
    }

    pub async fn list(
        &self,
        filter: SecurityEventFilter,
        page: PageRequest,
    ) -> Result<Paginated<SecurityEvent>, AppError> {
        Ok(SecurityEventRepository::new(self.db)
            .get_filtered_paginated(filter, page)
            .await?)
    }
}
