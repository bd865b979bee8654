//! Payment transaction domain models.
//!
//! A transaction is created `pending` at checkout and settled by the payment webhook.
//! Refunds accumulate in `refund_amount_cents`; the net amount is always
//! `amount_cents - refund_amount_cents`.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::transaction::{CheckoutResponseDto, TransactionDto};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    PartiallyRefunded,
    Refunded,
}

impl TransactionStatus {
    /// Statuses whose transactions count towards revenue.
    pub const SETTLED: [TransactionStatus; 3] = [
        TransactionStatus::Completed,
        TransactionStatus::PartiallyRefunded,
        TransactionStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::PartiallyRefunded => "partially_refunded",
            TransactionStatus::Refunded => "refunded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(TransactionStatus::Pending),
            "completed" => Some(TransactionStatus::Completed),
            "failed" => Some(TransactionStatus::Failed),
            "partially_refunded" => Some(TransactionStatus::PartiallyRefunded),
            "refunded" => Some(TransactionStatus::Refunded),
            _ => None,
        }
    }

    pub fn is_refundable(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Completed | TransactionStatus::PartiallyRefunded
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub amount_cents: i64,
    pub refund_amount_cents: i64,
    pub currency: String,
    pub status: TransactionStatus,
    pub payment_intent_id: Option<String>,
    pub refund_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub refunded_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn from_entity(entity: entity::transaction::Model) -> Result<Self, DbErr> {
        let status = TransactionStatus::parse(&entity.status).ok_or_else(|| {
            DbErr::Custom(format!("Unknown transaction status '{}'", entity.status))
        })?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            course_id: entity.course_id,
            amount_cents: entity.amount_cents,
            refund_amount_cents: entity.refund_amount_cents,
            currency: entity.currency,
            status,
            payment_intent_id: entity.payment_intent_id,
            refund_reason: entity.refund_reason,
            created_at: entity.created_at,
            completed_at: entity.completed_at,
            refunded_at: entity.refunded_at,
        })
    }

    pub fn net_amount_cents(&self) -> i64 {
        self.amount_cents - self.refund_amount_cents
    }

    /// Amount that can still be refunded.
    pub fn refundable_cents(&self) -> i64 {
        self.amount_cents - self.refund_amount_cents
    }

    pub fn into_dto(self) -> TransactionDto {
        TransactionDto {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            amount_cents: self.amount_cents,
            refund_amount_cents: self.refund_amount_cents,
            net_amount_cents: self.net_amount_cents(),
            currency: self.currency,
            status: self.status.as_str().to_string(),
            payment_intent_id: self.payment_intent_id,
            refund_reason: self.refund_reason,
            created_at: self.created_at,
            completed_at: self.completed_at,
            refunded_at: self.refunded_at,
        }
    }
}

/// Admin filters for the transaction list.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub status: Option<TransactionStatus>,
    pub user_id: Option<i32>,
    pub course_id: Option<i32>,
    /// Inclusive lower bound on `created_at`.
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created_at`.
    pub to: Option<DateTime<Utc>>,
}

/// Result of starting a checkout.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub transaction: Transaction,
    pub payment_intent_id: String,
    pub client_secret: String,
}

impl Checkout {
    pub fn into_dto(self) -> CheckoutResponseDto {
        CheckoutResponseDto {
            transaction_id: self.transaction.id,
            payment_intent_id: self.payment_intent_id,
            client_secret: self.client_secret,
            amount_cents: self.transaction.amount_cents,
            currency: self.transaction.currency,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RefundParams {
    pub transaction_id: i32,
    pub amount_cents: Option<i64>,
    pub reason: Option<String>,
}
