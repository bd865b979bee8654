//! Instructor payouts for closed earning periods.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::{payout::PayoutRepository, user::UserRepository},
    error::AppError,
    model::{
        audit::AuditEntry,
        pagination::{PageRequest, Paginated},
        payout::{CreatePayoutParams, Payout, PayoutStatus, PayoutTransition},
        user::User,
    },
    service::{audit::AuditService, commission::CommissionService},
    util::validation::sanitize_text,
};

pub struct PayoutService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PayoutService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending payout of the instructor's earnings for a period.
    ///
    /// # Returns
    /// - `Ok(Payout)` - Pending payout for the earned amount
    /// - `Err(AppError::NotFound)` - No such user
    /// - `Err(AppError::BadRequest)` - User is not an instructor, empty period, or nothing earned
    /// - `Err(AppError::Conflict)` - Period overlaps an active payout of the instructor
    pub async fn create(&self, actor: &User, params: CreatePayoutParams) -> Result<Payout, AppError> {
        if params.period_end <= params.period_start {
            return Err(AppError::BadRequest(
                "Payout period end must be after its start".to_string(),
            ));
        }

        let instructor = UserRepository::new(self.db)
            .find_by_id(params.instructor_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Instructor not found".to_string()))?;
        if !instructor.is_instructor() {
            return Err(AppError::BadRequest(format!(
                "User {} is not an instructor",
                instructor.id
            )));
        }

        let repo = PayoutRepository::new(self.db);
        let overlapping = repo
            .get_by_instructor(instructor.id)
            .await?
            .into_iter()
            .find(|p| {
                p.status.blocks_period() && p.overlaps(params.period_start, params.period_end)
            });
        if let Some(existing) = overlapping {
            return Err(AppError::Conflict(format!(
                "Period overlaps payout {} ({} to {})",
                existing.id, existing.period_start, existing.period_end
            )));
        }

        let earnings = CommissionService::new(self.db)
            .earnings(instructor.id, params.period_start, params.period_end)
            .await?;
        let amount = earnings.totals.instructor_share_cents;
        if amount <= 0 {
            return Err(AppError::BadRequest(
                "Instructor has no earnings in this period".to_string(),
            ));
        }

        let payout = repo
            .create(
                instructor.id,
                amount,
                earnings.commission_rate_bps,
                params.period_start,
                params.period_end,
            )
            .await?;

        tracing::info!(
            payout_id = payout.id,
            instructor_id = instructor.id,
            amount_cents = amount,
            "Payout created"
        );

        self.audit(actor, "payout.create", &payout).await?;

        Ok(payout)
    }

    pub async fn process(&self, actor: &User, payout_id: i32) -> Result<Payout, AppError> {
        self.transition(
            actor,
            payout_id,
            PayoutTransition {
                status: PayoutStatus::Processing,
                external_reference: None,
                failure_reason: None,
                paid_at: None,
            },
        )
        .await
    }

    pub async fn pay(
        &self,
        actor: &User,
        payout_id: i32,
        external_reference: Option<String>,
    ) -> Result<Payout, AppError> {
        self.transition(
            actor,
            payout_id,
            PayoutTransition {
                status: PayoutStatus::Paid,
                external_reference: external_reference
                    .map(|r| sanitize_text(&r))
                    .filter(|r| !r.is_empty()),
                failure_reason: None,
                paid_at: Some(Utc::now()),
            },
        )
        .await
    }

    /// Marks a pending or processing payout as failed; a reason is required.
    pub async fn fail(&self, actor: &User, payout_id: i32, reason: &str) -> Result<Payout, AppError> {
        let reason = sanitize_text(reason);
        if reason.is_empty() {
            return Err(AppError::BadRequest(
                "A failure reason is required".to_string(),
            ));
        }

        self.transition(
            actor,
            payout_id,
            PayoutTransition {
                status: PayoutStatus::Failed,
                external_reference: None,
                failure_reason: Some(reason),
                paid_at: None,
            },
        )
        .await
    }

    pub async fn cancel(&self, actor: &User, payout_id: i32) -> Result<Payout, AppError> {
        self.transition(
            actor,
            payout_id,
            PayoutTransition {
                status: PayoutStatus::Cancelled,
                external_reference: None,
                failure_reason: None,
                paid_at: None,
            },
        )
        .await
    }

    pub async fn list(
        &self,
        instructor_id: Option<i32>,
        status: Option<PayoutStatus>,
        page: PageRequest,
    ) -> Result<Paginated<Payout>, AppError> {
        Ok(PayoutRepository::new(self.db)
            .get_filtered_paginated(instructor_id, status, page)
            .await?)
    }

    pub async fn list_own(&self, instructor: &User) -> Result<Vec<Payout>, AppError> {
        Ok(PayoutRepository::new(self.db)
            .get_by_instructor(instructor.id)
            .await?)
    }

    /// Applies a status change permitted by the payout status machine.
    async fn transition(
        &self,
        actor: &User,
        payout_id: i32,
        transition: PayoutTransition,
    ) -> Result<Payout, AppError> {
        let repo = PayoutRepository::new(self.db);

        let payout = repo
            .find_by_id(payout_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Payout not found".to_string()))?;

        if !payout.status.can_transition_to(transition.status) {
            return Err(AppError::BadRequest(format!(
                "Cannot move payout from '{}' to '{}'",
                payout.status.as_str(),
                transition.status.as_str()
            )));
        }

        let updated = repo
            .apply_transition(payout_id, transition)
            .await?
            .ok_or_else(|| AppError::NotFound("Payout not found".to_string()))?;

        tracing::info!(
            payout_id,
            from = payout.status.as_str(),
            to = updated.status.as_str(),
            "Payout status changed"
        );

        self.audit(actor, &format!("payout.{}", updated.status.as_str()), &updated)
            .await?;

        Ok(updated)
    }

    async fn audit(&self, actor: &User, action: &str, payout: &Payout) -> Result<(), AppError> {
        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(actor.id), action, "instructor_payout")
                    .entity_id(payout.id)
                    .details(json!({
                        "instructor_id": payout.instructor_id,
                        "amount_cents": payout.amount_cents,
                        "status": payout.status.as_str(),
                    })),
            )
            .await?;
        Ok(())
    }
}
