//! Annual tax reports and CSV exports.

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::server::{
    data::{payout::PayoutRepository, transaction::TransactionRepository, user::UserRepository},
    error::AppError,
    model::{analytics::AnnualTaxReport, user::User},
    service::commission::CommissionService,
    util::time::{date_range, start_of_day, year_range},
};

#[derive(Serialize)]
struct AnnualReportRow<'r> {
    year: i32,
    instructor_id: i32,
    instructor_name: &'r str,
    instructor_email: &'r str,
    gross_cents: i64,
    refunds_cents: i64,
    net_cents: i64,
    instructor_earnings_cents: i64,
    paid_payouts_cents: i64,
}

#[derive(Serialize)]
struct TransactionRow<'r> {
    transaction_id: i32,
    completed_at: String,
    user_id: i32,
    course_id: i32,
    currency: &'r str,
    status: &'r str,
    amount_cents: i64,
    refund_amount_cents: i64,
    net_amount_cents: i64,
}

pub struct TaxService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TaxService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Yearly totals for one instructor.
    ///
    /// # Returns
    /// - `Ok(AnnualTaxReport)` - Sales totals, earnings and payouts paid during the year
    /// - `Err(AppError::NotFound)` - No such user
    pub async fn annual_report(&self, instructor_id: i32, year: i32) -> Result<AnnualTaxReport, AppError> {
        let instructor = UserRepository::new(self.db)
            .find_by_id(instructor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instructor not found".to_string()))?;

        self.report_for(&instructor, year).await
    }

    /// Reports for every instructor, ordered by id.
    pub async fn annual_reports(&self, year: i32) -> Result<Vec<AnnualTaxReport>, AppError> {
        let instructors = UserRepository::new(self.db).get_instructors().await?;

        let mut reports = Vec::with_capacity(instructors.len());
        for instructor in &instructors {
            reports.push(self.report_for(instructor, year).await?);
        }

        Ok(reports)
    }

    /// CSV of [`Self::annual_reports`], one row per instructor with a header line.
    pub async fn annual_reports_csv(&self, year: i32) -> Result<String, AppError> {
        let reports = self.annual_reports(year).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        for report in &reports {
            writer.serialize(AnnualReportRow {
                year: report.year,
                instructor_id: report.instructor_id,
                instructor_name: &report.instructor_name,
                instructor_email: &report.instructor_email,
                gross_cents: report.totals.gross_cents,
                refunds_cents: report.totals.refunds_cents,
                net_cents: report.totals.net_cents(),
                instructor_earnings_cents: report.totals.instructor_share_cents,
                paid_payouts_cents: report.paid_payouts_cents,
            })?;
        }

        finish(writer)
    }

    /// CSV of settled transactions completed in `[start, end)`.
    pub async fn transactions_csv(&self, start: NaiveDate, end: NaiveDate) -> Result<String, AppError> {
        let (from, to) = date_range(start, end)?;
        let transactions = TransactionRepository::new(self.db)
            .get_settled_in_range(None, from, to)
            .await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        for tx in &transactions {
            writer.serialize(TransactionRow {
                transaction_id: tx.id,
                completed_at: tx.completed_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
                user_id: tx.user_id,
                course_id: tx.course_id,
                currency: &tx.currency,
                status: tx.status.as_str(),
                amount_cents: tx.amount_cents,
                refund_amount_cents: tx.refund_amount_cents,
                net_amount_cents: tx.net_amount_cents(),
            })?;
        }

        finish(writer)
    }

    async fn report_for(&self, instructor: &User, year: i32) -> Result<AnnualTaxReport, AppError> {
        let (start, end) = year_range(year)?;

        let earnings = CommissionService::new(self.db)
            .earnings(instructor.id, start, end)
            .await?;
        let paid_payouts_cents = PayoutRepository::new(self.db)
            .sum_paid_in_range(instructor.id, start_of_day(start), start_of_day(end))
            .await?;

        Ok(AnnualTaxReport {
            instructor_id: instructor.id,
            instructor_name: instructor.name.clone(),
            instructor_email: instructor.email.clone(),
            year,
            totals: earnings.totals,
            paid_payouts_cents,
        })
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, AppError> {
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("Failed to flush CSV: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| AppError::InternalError(e.to_string()))
}
