//! Instructor payout repository.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pagination::{PageRequest, Paginated},
    payout::{Payout, PayoutStatus, PayoutTransition},
};

pub struct PayoutRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PayoutRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        instructor_id: i32,
        amount_cents: i64,
        commission_rate_bps: i32,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Payout, DbErr> {
        let entity = entity::instructor_payout::ActiveModel {
            instructor_id: ActiveValue::Set(instructor_id),
            amount_cents: ActiveValue::Set(amount_cents),
            currency: ActiveValue::Set("usd".to_string()),
            commission_rate_bps: ActiveValue::Set(commission_rate_bps),
            period_start: ActiveValue::Set(period_start),
            period_end: ActiveValue::Set(period_end),
            status: ActiveValue::Set(PayoutStatus::Pending.as_str().to_string()),
            external_reference: ActiveValue::Set(None),
            failure_reason: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            paid_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Payout::from_entity(entity)
    }

    pub async fn find_by_id(&self, payout_id: i32) -> Result<Option<Payout>, DbErr> {
        entity::prelude::InstructorPayout::find_by_id(payout_id)
            .one(self.db)
            .await?
            .map(Payout::from_entity)
            .transpose()
    }

    /// Every payout of an instructor, newest period first.
    pub async fn get_by_instructor(&self, instructor_id: i32) -> Result<Vec<Payout>, DbErr> {
        entity::prelude::InstructorPayout::find()
            .filter(entity::instructor_payout::Column::InstructorId.eq(instructor_id))
            .order_by_desc(entity::instructor_payout::Column::PeriodStart)
            .order_by_desc(entity::instructor_payout::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Payout::from_entity)
            .collect()
    }

    pub async fn get_filtered_paginated(
        &self,
        instructor_id: Option<i32>,
        status: Option<PayoutStatus>,
        page: PageRequest,
    ) -> Result<Paginated<Payout>, DbErr> {
        let mut query = entity::prelude::InstructorPayout::find();

        if let Some(instructor_id) = instructor_id {
            query = query.filter(entity::instructor_payout::Column::InstructorId.eq(instructor_id));
        }
        if let Some(status) = status {
            query = query.filter(entity::instructor_payout::Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by_desc(entity::instructor_payout::Column::CreatedAt)
            .order_by_desc(entity::instructor_payout::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(Payout::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(items, total, page.page, page.per_page))
    }

    /// Sum of paid payouts of an instructor with `paid_at` in `[start, end)`.
    pub async fn sum_paid_in_range(
        &self,
        instructor_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, DbErr> {
        let payouts = entity::prelude::InstructorPayout::find()
            .filter(entity::instructor_payout::Column::InstructorId.eq(instructor_id))
            .filter(entity::instructor_payout::Column::Status.eq(PayoutStatus::Paid.as_str()))
            .filter(entity::instructor_payout::Column::PaidAt.gte(start))
            .filter(entity::instructor_payout::Column::PaidAt.lt(end))
            .all(self.db)
            .await?;

        Ok(payouts.iter().map(|p| p.amount_cents).sum())
    }

    pub async fn apply_transition(
        &self,
        payout_id: i32,
        transition: PayoutTransition,
    ) -> Result<Option<Payout>, DbErr> {
        let Some(existing) = entity::prelude::InstructorPayout::find_by_id(payout_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::instructor_payout::ActiveModel = existing.into();
        active.status = ActiveValue::Set(transition.status.as_str().to_string());
        if transition.external_reference.is_some() {
            active.external_reference = ActiveValue::Set(transition.external_reference);
        }
        if transition.failure_reason.is_some() {
            active.failure_reason = ActiveValue::Set(transition.failure_reason);
        }
        if transition.paid_at.is_some() {
            active.paid_at = ActiveValue::Set(transition.paid_at);
        }

        Payout::from_entity(active.update(self.db).await?).map(Some)
    }
}
