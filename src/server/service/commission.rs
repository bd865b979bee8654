//! Instructor commission calculation.
//!
//! Instructors earn a share of the net amount (price minus refunds) of each settled sale.
//! The share is computed per transaction with round-half-up and then summed, so totals
//! always equal the sum of what each sale contributed.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{course::CourseRepository, transaction::TransactionRepository, user::UserRepository},
    error::AppError,
    model::{
        analytics::{CourseEarnings, Earnings, Totals},
        user::User,
    },
    service::setting::SettingService,
    util::time::date_range,
};

const BPS_DENOMINATOR: i64 = 10_000;

/// Instructor share of `net_cents` at `rate_bps`, rounded half up.
pub fn instructor_share(net_cents: i64, rate_bps: i32) -> i64 {
    let product = net_cents * rate_bps as i64;
    (product + BPS_DENOMINATOR / 2).div_euclid(BPS_DENOMINATOR)
}

pub struct CommissionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommissionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Commission rate that applies to an instructor.
    ///
    /// The instructor's override wins over the platform default.
    pub async fn effective_rate_bps(&self, instructor: &User) -> Result<i32, AppError> {
        match instructor.commission_rate_bps {
            Some(rate) => Ok(rate),
            None => SettingService::new(self.db).default_commission_rate_bps().await,
        }
    }

    /// Commission rate of each course's instructor, keyed by course id.
    ///
    /// Courses that no longer exist get the platform default.
    pub async fn rates_by_course(&self, course_ids: Vec<i32>) -> Result<HashMap<i32, i32>, AppError> {
        let default_rate = SettingService::new(self.db)
            .default_commission_rate_bps()
            .await?;

        let courses = CourseRepository::new(self.db)
            .find_by_ids(course_ids.clone())
            .await?;
        let instructor_ids: Vec<i32> = courses.values().map(|c| c.instructor_id).collect();
        let overrides: HashMap<i32, Option<i32>> = UserRepository::new(self.db)
            .find_by_ids(instructor_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.commission_rate_bps))
            .collect();

        Ok(course_ids
            .into_iter()
            .map(|course_id| {
                let rate = courses
                    .get(&course_id)
                    .and_then(|c| overrides.get(&c.instructor_id).copied().flatten())
                    .unwrap_or(default_rate);
                (course_id, rate)
            })
            .collect())
    }

    /// Earnings of an instructor from sales completed in `[start, end)`.
    ///
    /// # Returns
    /// - `Ok(Earnings)` - Totals and a per-course breakdown ordered by course id
    /// - `Err(AppError::NotFound)` - No such user
    /// - `Err(AppError::BadRequest)` - `end` is not after `start`
    pub async fn earnings(
        &self,
        instructor_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Earnings, AppError> {
        let (from, to) = date_range(start, end)?;

        let instructor = UserRepository::new(self.db)
            .find_by_id(instructor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instructor not found".to_string()))?;
        let rate = self.effective_rate_bps(&instructor).await?;

        let course_repo = CourseRepository::new(self.db);
        let course_ids = course_repo.get_ids_by_instructor(instructor_id).await?;
        let transactions = TransactionRepository::new(self.db)
            .get_settled_in_range(Some(course_ids.clone()), from, to)
            .await?;

        let mut totals = Totals::default();
        let mut per_course: BTreeMap<i32, Totals> = BTreeMap::new();
        for tx in &transactions {
            let share = instructor_share(tx.net_amount_cents(), rate);
            totals.add(tx.amount_cents, tx.refund_amount_cents, share);
            per_course
                .entry(tx.course_id)
                .or_default()
                .add(tx.amount_cents, tx.refund_amount_cents, share);
        }

        let courses = course_repo
            .find_by_ids(per_course.keys().copied().collect())
            .await?;
        let courses = per_course
            .into_iter()
            .map(|(course_id, totals)| CourseEarnings {
                course_id,
                course_title: courses
                    .get(&course_id)
                    .map(|c| c.title.clone())
                    .unwrap_or_default(),
                totals,
            })
            .collect();

        Ok(Earnings {
            instructor_id,
            commission_rate_bps: rate,
            start,
            end,
            totals,
            courses,
        })
    }
}
