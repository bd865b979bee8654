//! Financial aggregates computed from settled transactions.

use chrono::NaiveDate;

use crate::model::analytics::{
    AnnualTaxReportDto, CourseEarningsDto, EarningsDto, RevenueBucketDto, RevenueSummaryDto,
    TopCourseDto,
};

/// Running totals over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub transaction_count: u64,
    pub gross_cents: i64,
    pub refunds_cents: i64,
    pub instructor_share_cents: i64,
}

impl Totals {
    pub fn add(&mut self, amount_cents: i64, refund_cents: i64, instructor_share_cents: i64) {
        self.transaction_count += 1;
        self.gross_cents += amount_cents;
        self.refunds_cents += refund_cents;
        self.instructor_share_cents += instructor_share_cents;
    }

    pub fn net_cents(&self) -> i64 {
        self.gross_cents - self.refunds_cents
    }

    pub fn platform_fee_cents(&self) -> i64 {
        self.net_cents() - self.instructor_share_cents
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseEarnings {
    pub course_id: i32,
    pub course_title: String,
    pub totals: Totals,
}

/// Instructor earnings over a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct Earnings {
    pub instructor_id: i32,
    pub commission_rate_bps: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub totals: Totals,
    /// Ordered by course id.
    pub courses: Vec<CourseEarnings>,
}

impl Earnings {
    pub fn into_dto(self) -> EarningsDto {
        EarningsDto {
            instructor_id: self.instructor_id,
            commission_rate_bps: self.commission_rate_bps,
            start: self.start,
            end: self.end,
            transaction_count: self.totals.transaction_count,
            gross_cents: self.totals.gross_cents,
            refunds_cents: self.totals.refunds_cents,
            net_cents: self.totals.net_cents(),
            instructor_share_cents: self.totals.instructor_share_cents,
            platform_fee_cents: self.totals.platform_fee_cents(),
            courses: self
                .courses
                .into_iter()
                .map(|c| CourseEarningsDto {
                    course_id: c.course_id,
                    course_title: c.course_title,
                    transaction_count: c.totals.transaction_count,
                    gross_cents: c.totals.gross_cents,
                    refunds_cents: c.totals.refunds_cents,
                    net_cents: c.totals.net_cents(),
                    instructor_share_cents: c.totals.instructor_share_cents,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub totals: Totals,
}

impl RevenueSummary {
    /// Net revenue per transaction, rounded down; zero without transactions.
    pub fn average_order_value_cents(&self) -> i64 {
        if self.totals.transaction_count == 0 {
            0
        } else {
            self.totals.net_cents() / self.totals.transaction_count as i64
        }
    }

    pub fn into_dto(self) -> RevenueSummaryDto {
        RevenueSummaryDto {
            start: self.start,
            end: self.end,
            transaction_count: self.totals.transaction_count,
            gross_cents: self.totals.gross_cents,
            refunds_cents: self.totals.refunds_cents,
            net_cents: self.totals.net_cents(),
            instructor_share_cents: self.totals.instructor_share_cents,
            platform_revenue_cents: self.totals.platform_fee_cents(),
            average_order_value_cents: self.average_order_value_cents(),
        }
    }
}

/// Bucket size for revenue time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "day" => Some(Granularity::Day),
            "week" => Some(Granularity::Week),
            "month" => Some(Granularity::Month),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueBucket {
    pub period_start: NaiveDate,
    pub totals: Totals,
}

impl RevenueBucket {
    pub fn into_dto(self) -> RevenueBucketDto {
        RevenueBucketDto {
            period_start: self.period_start,
            transaction_count: self.totals.transaction_count,
            gross_cents: self.totals.gross_cents,
            refunds_cents: self.totals.refunds_cents,
            net_cents: self.totals.net_cents(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopCourse {
    pub course_id: i32,
    pub title: String,
    pub transaction_count: u64,
    pub net_cents: i64,
}

impl TopCourse {
    pub fn into_dto(self) -> TopCourseDto {
        TopCourseDto {
            course_id: self.course_id,
            title: self.title,
            transaction_count: self.transaction_count,
            net_cents: self.net_cents,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnualTaxReport {
    pub instructor_id: i32,
    pub instructor_name: String,
    pub instructor_email: String,
    pub year: i32,
    pub totals: Totals,
    pub paid_payouts_cents: i64,
}

impl AnnualTaxReport {
    pub fn into_dto(self) -> AnnualTaxReportDto {
        AnnualTaxReportDto {
            instructor_id: self.instructor_id,
            instructor_name: self.instructor_name,
            instructor_email: self.instructor_email,
            year: self.year,
            gross_cents: self.totals.gross_cents,
            refunds_cents: self.totals.refunds_cents,
            net_cents: self.totals.net_cents(),
            instructor_earnings_cents: self.totals.instructor_share_cents,
            paid_payouts_cents: self.paid_payouts_cents,
        }
    }
}
