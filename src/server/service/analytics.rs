//! Platform revenue reporting.
//!
//! All figures are computed from settled transactions whose `completed_at` falls in the
//! requested `[start, end)` range. Instructor shares use the commission rate of each
//! course's instructor.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Duration, NaiveDate};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{course::CourseRepository, transaction::TransactionRepository},
    error::AppError,
    model::{
        analytics::{Granularity, RevenueBucket, RevenueSummary, TopCourse, Totals},
        transaction::Transaction,
    },
    service::commission::{instructor_share, CommissionService},
    util::time::{date_range, month_start, next_month_start, week_start},
};

pub const DEFAULT_TOP_COURSES: u64 = 10;
pub const MAX_TOP_COURSES: u64 = 100;
/// About ten years of daily buckets.
pub const MAX_REVENUE_BUCKETS: usize = 3660;

pub struct AnalyticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn summary(&self, start: NaiveDate, end: NaiveDate) -> Result<RevenueSummary, AppError> {
        let transactions = self.settled(start, end).await?;
        let rates = self.rates_for(&transactions).await?;

        let mut totals = Totals::default();
        for tx in &transactions {
            add_transaction(&mut totals, tx, &rates);
        }

        Ok(RevenueSummary { start, end, totals })
    }

    /// Revenue split into consecutive day, week or month buckets.
    ///
    /// The first bucket starts at the beginning of the period containing `start` and
    /// buckets continue until `end`. Buckets without sales are included with zero totals.
    /// Ranges needing more than [`MAX_REVENUE_BUCKETS`] buckets are rejected with
    /// `AppError::BadRequest`.
    pub async fn revenue_by_period(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
    ) -> Result<Vec<RevenueBucket>, AppError> {
        let mut buckets: BTreeMap<NaiveDate, Totals> = BTreeMap::new();
        let mut period = Some(period_start(start, granularity));
        while let Some(current) = period.filter(|p| *p < end) {
            if buckets.len() == MAX_REVENUE_BUCKETS {
                return Err(AppError::BadRequest(format!(
                    "Range spans more than {} buckets",
                    MAX_REVENUE_BUCKETS
                )));
            }
            buckets.insert(current, Totals::default());
            period = next_period(current, granularity);
        }

        let transactions = self.settled(start, end).await?;
        let rates = self.rates_for(&transactions).await?;

        for tx in &transactions {
            let Some(completed_at) = tx.completed_at else {
                continue;
            };
            let key = period_start(completed_at.date_naive(), granularity);
            add_transaction(buckets.entry(key).or_default(), tx, &rates);
        }

        Ok(buckets
            .into_iter()
            .map(|(period_start, totals)| RevenueBucket {
                period_start,
                totals,
            })
            .collect())
    }

    /// Courses ranked by net revenue, ties broken by course id.
    ///
    /// # Returns
    /// - `Ok(Vec<TopCourse>)` - At most `limit` courses, `10` when not given
    /// - `Err(AppError::BadRequest)` - Limit outside `1..=100` or invalid range
    pub async fn top_courses(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: Option<u64>,
    ) -> Result<Vec<TopCourse>, AppError> {
        let limit = limit.unwrap_or(DEFAULT_TOP_COURSES);
        if !(1..=MAX_TOP_COURSES).contains(&limit) {
            return Err(AppError::BadRequest(format!(
                "Limit must be between 1 and {}",
                MAX_TOP_COURSES
            )));
        }

        let transactions = self.settled(start, end).await?;

        let mut per_course: HashMap<i32, (u64, i64)> = HashMap::new();
        for tx in &transactions {
            let entry = per_course.entry(tx.course_id).or_default();
            entry.0 += 1;
            entry.1 += tx.net_amount_cents();
        }

        let mut ranked: Vec<(i32, u64, i64)> = per_course
            .into_iter()
            .map(|(course_id, (count, net))| (course_id, count, net))
            .collect();
        ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
        ranked.truncate(limit as usize);

        let courses = CourseRepository::new(self.db)
            .find_by_ids(ranked.iter().map(|r| r.0).collect())
            .await?;

        Ok(ranked
            .into_iter()
            .map(|(course_id, transaction_count, net_cents)| TopCourse {
                course_id,
                title: courses
                    .get(&course_id)
                    .map(|c| c.title.clone())
                    .unwrap_or_default(),
                transaction_count,
                net_cents,
            })
            .collect())
    }

    async fn settled(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>, AppError> {
        let (from, to) = date_range(start, end)?;

        Ok(TransactionRepository::new(self.db)
            .get_settled_in_range(None, from, to)
            .await?)
    }

    async fn rates_for(&self, transactions: &[Transaction]) -> Result<HashMap<i32, i32>, AppError> {
        let course_ids: HashSet<i32> = transactions.iter().map(|t| t.course_id).collect();

        CommissionService::new(self.db)
            .rates_by_course(course_ids.into_iter().collect())
            .await
    }
}

fn add_transaction(totals: &mut Totals, tx: &Transaction, rates: &HashMap<i32, i32>) {
    let rate = rates.get(&tx.course_id).copied().unwrap_or_default();
    totals.add(
        tx.amount_cents,
        tx.refund_amount_cents,
        instructor_share(tx.net_amount_cents(), rate),
    );
}

fn period_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => week_start(date),
        Granularity::Month => month_start(date),
    }
}

/// Start of the following period, `None` past the last representable date.
fn next_period(period: NaiveDate, granularity: Granularity) -> Option<NaiveDate> {
    match granularity {
        Granularity::Day => period.checked_add_signed(Duration::days(1)),
        Granularity::Week => period.checked_add_signed(Duration::days(7)),
        Granularity::Month => Some(next_month_start(period)).filter(|next| *next > period),
    }
}
