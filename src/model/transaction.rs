use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, ToSchema)]
pub struct TransactionDto {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub amount_cents: i64,
    pub refund_amount_cents: i64,
    pub net_amount_cents: i64,
    pub currency: String,
    /// `pending`, `completed`, `failed`, `partially_refunded` or `refunded`.
    pub status: String,
    pub payment_intent_id: Option<String>,
    pub refund_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub refunded_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CheckoutDto {
    pub course_id: i32,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CheckoutResponseDto {
    pub transaction_id: i32,
    pub payment_intent_id: String,
    pub client_secret: String,
    pub amount_cents: i64,
    pub currency: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RefundDto {
    /// Defaults to the remaining refundable amount.
    pub amount_cents: Option<i64>,
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct WebhookAckDto {
    pub received: bool,
}
