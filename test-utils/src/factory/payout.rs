//! Instructor payout factory.

use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a payout for `[period_start, period_end)` with the given status.
pub async fn create_payout(
    db: &DatabaseConnection,
    instructor_id: i32,
    amount_cents: i64,
    period_start: NaiveDate,
    period_end: NaiveDate,
    status: &str,
) -> Result<entity::instructor_payout::Model, DbErr> {
    let paid_at = (status == "paid").then(Utc::now);

    entity::instructor_payout::ActiveModel {
        instructor_id: ActiveValue::Set(instructor_id),
        amount_cents: ActiveValue::Set(amount_cents),
        currency: ActiveValue::Set("usd".to_string()),
        commission_rate_bps: ActiveValue::Set(7000),
        period_start: ActiveValue::Set(period_start),
        period_end: ActiveValue::Set(period_end),
        status: ActiveValue::Set(status.to_string()),
        external_reference: ActiveValue::Set(None),
        failure_reason: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        paid_at: ActiveValue::Set(paid_at),
        ..Default::default()
    }
    .insert(db)
    .await
}
