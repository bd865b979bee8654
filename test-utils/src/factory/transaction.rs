//! Transaction factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for payment transactions.
///
/// Defaults to a completed 10000 cent `usd` transaction completed now, with a unique
/// payment intent id.
pub struct TransactionFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    course_id: i32,
    amount_cents: i64,
    refund_amount_cents: i64,
    status: String,
    payment_intent_id: Option<String>,
    completed_at: Option<DateTime<Utc>>,
}

impl<'a> TransactionFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32, course_id: i32) -> Self {
        Self {
            db,
            user_id,
            course_id,
            amount_cents: 10_000,
            refund_amount_cents: 0,
            status: "completed".to_string(),
            payment_intent_id: Some(format!("pi_test_{}", next_id())),
            completed_at: Some(Utc::now()),
        }
    }

    pub fn amount_cents(mut self, amount_cents: i64) -> Self {
        self.amount_cents = amount_cents;
        self
    }

    pub fn refund_amount_cents(mut self, refund_amount_cents: i64) -> Self {
        self.refund_amount_cents = refund_amount_cents;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn payment_intent_id(mut self, payment_intent_id: impl Into<String>) -> Self {
        self.payment_intent_id = Some(payment_intent_id.into());
        self
    }

    /// Sets the completion time; `None` for pending or failed transactions.
    pub fn completed_at(mut self, completed_at: Option<DateTime<Utc>>) -> Self {
        self.completed_at = completed_at;
        self
    }

    pub async fn build(self) -> Result<entity::transaction::Model, DbErr> {
        let refunded_at = (self.refund_amount_cents > 0).then(Utc::now);

        entity::transaction::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            course_id: ActiveValue::Set(self.course_id),
            amount_cents: ActiveValue::Set(self.amount_cents),
            refund_amount_cents: ActiveValue::Set(self.refund_amount_cents),
            currency: ActiveValue::Set("usd".to_string()),
            status: ActiveValue::Set(self.status),
            payment_intent_id: ActiveValue::Set(self.payment_intent_id),
            refund_reason: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.completed_at.unwrap_or_else(Utc::now)),
            completed_at: ActiveValue::Set(self.completed_at),
            refunded_at: ActiveValue::Set(refunded_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a completed transaction of `amount_cents` completed at `completed_at`.
pub async fn create_completed_transaction(
    db: &DatabaseConnection,
    user_id: i32,
    course_id: i32,
    amount_cents: i64,
    completed_at: DateTime<Utc>,
) -> Result<entity::transaction::Model, DbErr> {
    TransactionFactory::new(db, user_id, course_id)
        .amount_cents(amount_cents)
        .completed_at(Some(completed_at))
        .build()
        .await
}
