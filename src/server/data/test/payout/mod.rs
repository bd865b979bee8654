use chrono::{Duration, NaiveDate, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::payout::PayoutRepository,
    model::{pagination::PageRequest, payout::PayoutStatus},
};

mod get_filtered_paginated;
mod sum_paid_in_range;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
