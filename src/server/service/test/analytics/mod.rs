use chrono::{DateTime, Duration, NaiveDate, Utc};
use test_utils::{builder::TestBuilder, factory, factory::transaction::TransactionFactory};

use crate::server::{
    error::AppError, model::analytics::Granularity, service::analytics::AnalyticsService,
    util::time::start_of_day,
};

mod top_courses;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    start_of_day(date(y, m, d)) + Duration::hours(12)
}
