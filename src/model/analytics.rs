use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CourseEarningsDto {
    pub course_id: i32,
    pub course_title: String,
    pub transaction_count: u64,
    pub gross_cents: i64,
    pub refunds_cents: i64,
    pub net_cents: i64,
    pub instructor_share_cents: i64,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct EarningsDto {
    pub instructor_id: i32,
    pub commission_rate_bps: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub transaction_count: u64,
    pub gross_cents: i64,
    pub refunds_cents: i64,
    pub net_cents: i64,
    pub instructor_share_cents: i64,
    pub platform_fee_cents: i64,
    pub courses: Vec<CourseEarningsDto>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RevenueSummaryDto {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub transaction_count: u64,
    pub gross_cents: i64,
    pub refunds_cents: i64,
    pub net_cents: i64,
    pub instructor_share_cents: i64,
    pub platform_revenue_cents: i64,
    pub average_order_value_cents: i64,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct RevenueBucketDto {
    pub period_start: NaiveDate,
    pub transaction_count: u64,
    pub gross_cents: i64,
    pub refunds_cents: i64,
    pub net_cents: i64,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TopCourseDto {
    pub course_id: i32,
    pub title: String,
    pub transaction_count: u64,
    pub net_cents: i64,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AnnualTaxReportDto {
    pub instructor_id: i32,
    pub instructor_name: String,
    pub instructor_email: String,
    pub year: i32,
    pub gross_cents: i64,
    pub refunds_cents: i64,
    pub net_cents: i64,
    pub instructor_earnings_cents: i64,
    pub paid_payouts_cents: i64,
}
