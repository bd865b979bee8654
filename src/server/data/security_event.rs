//! Security event repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    audit::{NewSecurityEvent, SecurityEvent, SecurityEventFilter},
    pagination::{PageRequest, Paginated},
};

pub struct SecurityEventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SecurityEventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, event: NewSecurityEvent) -> Result<SecurityEvent, DbErr> {
        let entity = entity::security_event::ActiveModel {
            event_type: ActiveValue::Set(event.event_type.to_string()),
            severity: ActiveValue::Set(event.severity.as_str().to_string()),
            user_id: ActiveValue::Set(event.user_id),
            ip_address: ActiveValue::Set(event.ip_address),
            details: ActiveValue::Set(event.details),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(SecurityEvent::from_entity(entity))
    }

    /// Lists events newest first.
    pub async fn get_filtered_paginated(
        &self,
        filter: SecurityEventFilter,
        page: PageRequest,
    ) -> Result<Paginated<SecurityEvent>, DbErr> {
        let mut query = entity::prelude::SecurityEvent::find();

        if let Some(event_type) = filter.event_type {
            query = query.filter(entity::security_event::Column::EventType.eq(event_type));
        }
        if let Some(severity) = filter.severity {
            query = query.filter(entity::security_event::Column::Severity.eq(severity));
        }

        let paginator = query
            .order_by_desc(entity::security_event::Column::CreatedAt)
            .order_by_desc(entity::security_event::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(SecurityEvent::from_entity)
            .collect();

        Ok(Paginated::new(items, total, page.page, page.per_page))
    }
}
