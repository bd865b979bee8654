//! Instructor payout domain model and its status machine.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::DbErr;

use crate::model::payout::PayoutDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutStatus {
    Pending,
    Processing,
    Paid,
    Failed,
    Cancelled,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Processing => "processing",
            PayoutStatus::Paid => "paid",
            PayoutStatus::Failed => "failed",
            PayoutStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(PayoutStatus::Pending),
            "processing" => Some(PayoutStatus::Processing),
            "paid" => Some(PayoutStatus::Paid),
            "failed" => Some(PayoutStatus::Failed),
            "cancelled" => Some(PayoutStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether a payout may move from `self` to `next`.
    ///
    /// ```text
    /// pending -> processing -> paid
    /// pending | processing -> failed
    /// pending -> cancelled
    /// ```
    pub fn can_transition_to(&self, next: PayoutStatus) -> bool {
        use PayoutStatus::*;

        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Paid)
                | (Pending, Failed)
                | (Processing, Failed)
                | (Pending, Cancelled)
        )
    }

    /// Payouts in these states still claim their period.
    pub fn blocks_period(&self) -> bool {
        !matches!(self, PayoutStatus::Failed | PayoutStatus::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payout {
    pub id: i32,
    pub instructor_id: i32,
    pub amount_cents: i64,
    pub currency: String,
    pub commission_rate_bps: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub status: PayoutStatus,
    pub external_reference: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Payout {
    pub fn from_entity(entity: entity::instructor_payout::Model) -> Result<Self, DbErr> {
        let status = PayoutStatus::parse(&entity.status)
            .ok_or_else(|| DbErr::Custom(format!("Unknown payout status '{}'", entity.status)))?;

        Ok(Self {
            id: entity.id,
            instructor_id: entity.instructor_id,
            amount_cents: entity.amount_cents,
            currency: entity.currency,
            commission_rate_bps: entity.commission_rate_bps,
            period_start: entity.period_start,
            period_end: entity.period_end,
            status,
            external_reference: entity.external_reference,
            failure_reason: entity.failure_reason,
            created_at: entity.created_at,
            paid_at: entity.paid_at,
        })
    }

    pub fn into_dto(self) -> PayoutDto {
        PayoutDto {
            id: self.id,
            instructor_id: self.instructor_id,
            amount_cents: self.amount_cents,
            currency: self.currency,
            commission_rate_bps: self.commission_rate_bps,
            period_start: self.period_start,
            period_end: self.period_end,
            status: self.status.as_str().to_string(),
            external_reference: self.external_reference,
            failure_reason: self.failure_reason,
            created_at: self.created_at,
            paid_at: self.paid_at,
        }
    }

    /// Whether `[start, end)` intersects this payout's period.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.period_start < end && start < self.period_end
    }
}

#[derive(Debug, Clone)]
pub struct CreatePayoutParams {
    pub instructor_id: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Values written when a payout changes status.
#[derive(Debug, Clone)]
pub struct PayoutTransition {
    pub status: PayoutStatus,
    pub external_reference: Option<String>,
    pub failure_reason: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}
