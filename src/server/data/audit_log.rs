//! Audit log repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    audit::{AuditEntry, AuditFilter, AuditLog},
    pagination::{PageRequest, Paginated},
};

pub struct AuditLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuditLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, entry: AuditEntry) -> Result<AuditLog, DbErr> {
        let entity = entity::audit_log::ActiveModel {
            actor_id: ActiveValue::Set(entry.actor_id),
            action: ActiveValue::Set(entry.action),
            entity_type: ActiveValue::Set(entry.entity_type),
            entity_id: ActiveValue::Set(entry.entity_id),
            details: ActiveValue::Set(entry.details.map(|d| d.to_string())),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(AuditLog::from_entity(entity))
    }

    /// Lists entries newest first.
    pub async fn get_filtered_paginated(
        &self,
        filter: AuditFilter,
        page: PageRequest,
    ) -> Result<Paginated<AuditLog>, DbErr> {
        let mut query = entity::prelude::AuditLog::find();

        if let Some(actor_id) = filter.actor_id {
            query = query.filter(entity::audit_log::Column::ActorId.eq(actor_id));
        }
        if let Some(entity_type) = filter.entity_type {
            query = query.filter(entity::audit_log::Column::EntityType.eq(entity_type));
        }

        let paginator = query
            .order_by_desc(entity::audit_log::Column::CreatedAt)
            .order_by_desc(entity::audit_log::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(AuditLog::from_entity)
            .collect();

        Ok(Paginated::new(items, total, page.page, page.per_page))
    }
}
