//! Transaction repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pagination::{PageRequest, Paginated},
    transaction::{Transaction, TransactionFilter, TransactionStatus},
};

pub struct TransactionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TransactionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counts transactions of a course of any status.
    pub async fn count_by_course(&self, course_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Transaction::find()
            .filter(entity::transaction::Column::CourseId.eq(course_id))
            .count(self.db)
            .await
    }

    /// Records a pending purchase tied to a gateway payment intent.
    pub async fn create_pending(
        &self,
        user_id: i32,
        course_id: i32,
        amount_cents: i64,
        currency: String,
        payment_intent_id: String,
    ) -> Result<Transaction, DbErr> {
        let entity = entity::transaction::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            course_id: ActiveValue::Set(course_id),
            amount_cents: ActiveValue::Set(amount_cents),
            refund_amount_cents: ActiveValue::Set(0),
            currency: ActiveValue::Set(currency),
            status: ActiveValue::Set(TransactionStatus::Pending.as_str().to_string()),
            payment_intent_id: ActiveValue::Set(Some(payment_intent_id)),
            refund_reason: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            completed_at: ActiveValue::Set(None),
            refunded_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Transaction::from_entity(entity)
    }

    pub async fn find_by_id(&self, transaction_id: i32) -> Result<Option<Transaction>, DbErr> {
        entity::prelude::Transaction::find_by_id(transaction_id)
            .one(self.db)
            .await?
            .map(Transaction::from_entity)
            .transpose()
    }

    pub async fn find_by_payment_intent(
        &self,
        payment_intent_id: &str,
    ) -> Result<Option<Transaction>, DbErr> {
        entity::prelude::Transaction::find()
            .filter(entity::transaction::Column::PaymentIntentId.eq(payment_intent_id))
            .one(self.db)
            .await?
            .map(Transaction::from_entity)
            .transpose()
    }

    /// Sets the status, stamping `completed_at` when given.
    pub async fn set_status(
        &self,
        transaction_id: i32,
        status: TransactionStatus,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Transaction>, DbErr> {
        let Some(existing) = entity::prelude::Transaction::find_by_id(transaction_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::transaction::ActiveModel = existing.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        if completed_at.is_some() {
            active.completed_at = ActiveValue::Set(completed_at);
        }

        Transaction::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Stores a new cumulative refund amount and the resulting status.
    pub async fn apply_refund(
        &self,
        transaction_id: i32,
        refund_amount_cents: i64,
        status: TransactionStatus,
        reason: Option<String>,
    ) -> Result<Option<Transaction>, DbErr> {
        let Some(existing) = entity::prelude::Transaction::find_by_id(transaction_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::transaction::ActiveModel = existing.into();
        active.refund_amount_cents = ActiveValue::Set(refund_amount_cents);
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.refunded_at = ActiveValue::Set(Some(Utc::now()));
        if reason.is_some() {
            active.refund_reason = ActiveValue::Set(reason);
        }

        Transaction::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Lists transactions matching the filter, newest first.
    pub async fn get_filtered_paginated(
        &self,
        filter: TransactionFilter,
        page: PageRequest,
    ) -> Result<Paginated<Transaction>, DbErr> {
        let mut query = entity::prelude::Transaction::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::transaction::Column::Status.eq(status.as_str()));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(entity::transaction::Column::UserId.eq(user_id));
        }
        if let Some(course_id) = filter.course_id {
            query = query.filter(entity::transaction::Column::CourseId.eq(course_id));
        }
        if let Some(from) = filter.from {
            query = query.filter(entity::transaction::Column::CreatedAt.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(entity::transaction::Column::CreatedAt.lt(to));
        }

        let paginator = query
            .order_by_desc(entity::transaction::Column::CreatedAt)
            .order_by_desc(entity::transaction::Column::Id)
            .paginate(self.db, page.per_page);

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(page.page)
            .await?
            .into_iter()
            .map(Transaction::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(items, total, page.page, page.per_page))
    }

    /// Settled transactions completed in `[start, end)`.
    ///
    /// # Arguments
    /// - `course_ids` - Restrict to these courses; `None` means every course
    /// - `start` - Inclusive lower bound on `completed_at`
    /// - `end` - Exclusive upper bound on `completed_at`
    ///
    /// # Returns
    /// - `Ok(Vec<Transaction>)` - Completed, partially refunded and refunded transactions,
    ///   ordered by completion time
    /// - `Err(DbErr)` - Database error
    pub async fn get_settled_in_range(
        &self,
        course_ids: Option<Vec<i32>>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, DbErr> {
        let statuses: Vec<&str> = TransactionStatus::SETTLED
            .iter()
            .map(|s| s.as_str())
            .collect();

        let mut query = entity::prelude::Transaction::find()
            .filter(entity::transaction::Column::Status.is_in(statuses))
            .filter(entity::transaction::Column::CompletedAt.gte(start))
            .filter(entity::transaction::Column::CompletedAt.lt(end));

        if let Some(course_ids) = course_ids {
            if course_ids.is_empty() {
                return Ok(Vec::new());
            }
            query = query.filter(entity::transaction::Column::CourseId.is_in(course_ids));
        }

        query
            .order_by_asc(entity::transaction::Column::CompletedAt)
            .order_by_asc(entity::transaction::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Transaction::from_entity)
            .collect()
    }
}
