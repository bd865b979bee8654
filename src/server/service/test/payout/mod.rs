use chrono::{DateTime, Duration, NaiveDate, Utc};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    model::{
        payout::{CreatePayoutParams, PayoutStatus},
        user::User,
    },
    service::payout::PayoutService,
    util::time::start_of_day,
};

mod create;
mod transition;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    start_of_day(date(y, m, d)) + Duration::hours(12)
}

fn january(instructor_id: i32) -> CreatePayoutParams {
    CreatePayoutParams {
        instructor_id,
        period_start: date(2024, 1, 1),
        period_end: date(2024, 2, 1),
    }
}
