//! Audit trail of administrative and authoring changes.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::audit_log::AuditLogRepository,
    error::AppError,
    model::{
        audit::{AuditEntry, AuditFilter, AuditLog},
        pagination::{PageRequest, Paginated},
    },
};

pub struct AuditService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuditService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends an entry to the audit log.
    ///
    /// Called by other services after every successful mutation.
    pub async fn record(&self, entry: AuditEntry) -> Result<AuditLog, AppError> {
        tracing::debug!(
            action = %entry.action,
            entity_type = %entry.entity_type,
            entity_id = ?entry.entity_id,
            "audit"
        );

        Ok(AuditLogRepository::new(self.db).create(entry).await?)
    }

    pub async fn list(
        &self,
        filter: AuditFilter,
        page: PageRequest,
    ) -> Result<Paginated<AuditLog>, AppError> {
        Ok(AuditLogRepository::new(self.db)
            .get_filtered_paginated(filter, page)
            .await?)
    }
}
