use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct PayoutDto {
    pub id: i32,
    pub instructor_id: i32,
    pub amount_cents: i64,
    pub currency: String,
    pub commission_rate_bps: i32,
    pub period_start: NaiveDate,
    /// Exclusive.
    pub period_end: NaiveDate,
    /// `pending`, `processing`, `paid`, `failed` or `cancelled`.
    pub status: String,
    pub external_reference: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreatePayoutDto {
    pub instructor_id: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MarkPaidDto {
    pub external_reference: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MarkFailedDto {
    pub reason: String,
}
