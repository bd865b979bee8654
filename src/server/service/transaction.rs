//! Course purchases: checkout, webhook settlement and refunds.

use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::{enrollment::EnrollmentRepository, transaction::TransactionRepository},
    error::AppError,
    model::{
        audit::{event_type, AuditEntry, NewSecurityEvent, Severity},
        pagination::{PageRequest, Paginated},
        transaction::{Checkout, RefundParams, Transaction, TransactionFilter, TransactionStatus},
        user::User,
    },
    service::{
        audit::AuditService,
        enrollment::EnrollmentService,
        payment::{
            webhook::{self, WebhookEvent, PAYMENT_FAILED, PAYMENT_SUCCEEDED},
            PaymentGateway, PaymentIntentRequest,
        },
        security_event::SecurityEventService,
    },
    util::validation::sanitize_text,
};

pub struct TransactionService<'a> {
    db: &'a DatabaseConnection,
    gateway: &'a dyn PaymentGateway,
}

impl<'a> TransactionService<'a> {
    pub fn new(db: &'a DatabaseConnection, gateway: &'a dyn PaymentGateway) -> Self {
        Self { db, gateway }
    }

    /// Starts the purchase of a paid course.
    ///
    /// Creates a payment intent with the gateway and a `pending` transaction referencing it.
    ///
    /// # Returns
    /// - `Ok(Checkout)` - Pending transaction and the client secret for the payment form
    /// - `Err(AppError::NotFound)` - Course missing or unpublished
    /// - `Err(AppError::BadRequest)` - Course is free, or owned by the buyer
    /// - `Err(AppError::Conflict)` - Buyer is already enrolled
    /// - `Err(AppError::PaymentErr)` - Gateway failure
    pub async fn checkout(&self, user: &User, course_id: i32) -> Result<Checkout, AppError> {
        let course = EnrollmentService::new(self.db)
            .get_enrollable(user, course_id)
            .await?;

        if course.is_free() {
            return Err(AppError::BadRequest(
                "Free courses do not require checkout".to_string(),
            ));
        }

        let intent = self
            .gateway
            .create_payment_intent(PaymentIntentRequest {
                amount_cents: course.price_cents,
                currency: course.currency.clone(),
                user_id: user.id,
                course_id,
            })
            .await?;

        let transaction = TransactionRepository::new(self.db)
            .create_pending(
                user.id,
                course_id,
                course.price_cents,
                course.currency,
                intent.id.clone(),
            )
            .await?;

        tracing::info!(
            transaction_id = transaction.id,
            user_id = user.id,
            course_id,
            "Checkout started"
        );

        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(user.id), "transaction.checkout", "transaction")
                    .entity_id(transaction.id)
                    .details(json!({
                        "course_id": course_id,
                        "amount_cents": transaction.amount_cents,
                    })),
            )
            .await?;

        Ok(Checkout {
            transaction,
            payment_intent_id: intent.id,
            client_secret: intent.client_secret,
        })
    }

    /// Processes a gateway webhook.
    ///
    /// # Arguments
    /// - `payload` - Raw request body
    /// - `signature` - `Stripe-Signature` header, if present
    /// - `secret` - Webhook endpoint secret
    /// - `ip` - Caller address, recorded when the signature is rejected
    ///
    /// # Returns
    /// - `Ok(())` - Event handled or deliberately ignored
    /// - `Err(AppError::PaymentErr)` - Invalid signature or payload
    pub async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
        secret: &str,
        ip: Option<String>,
    ) -> Result<(), AppError> {
        let verified = webhook::verify_signature(
            payload,
            signature.unwrap_or_default(),
            secret,
            Utc::now().timestamp(),
            webhook::SIGNATURE_TOLERANCE_SECS,
        );

        if let Err(err) = verified {
            SecurityEventService::new(self.db)
                .record(
                    NewSecurityEvent::new(event_type::WEBHOOK_SIGNATURE_INVALID, Severity::Warning)
                        .ip(ip)
                        .details(err.to_string()),
                )
                .await?;
            return Err(err.into());
        }

        let event = WebhookEvent::parse(payload)?;

        match event.event_type.as_str() {
            PAYMENT_SUCCEEDED => self.payment_succeeded(event.object_id()?).await,
            PAYMENT_FAILED => self.payment_failed(event.object_id()?).await,
            other => {
                tracing::debug!(event_id = %event.id, event_type = other, "Ignoring webhook event");
                Ok(())
            }
        }
    }

    /// Refunds part or all of a settled transaction.
    ///
    /// A failing gateway refund is logged and the refund is still recorded locally.
    ///
    /// # Returns
    /// - `Ok(Transaction)` - Updated transaction, `refunded` when nothing is left to refund
    /// - `Err(AppError::NotFound)` - No such transaction
    /// - `Err(AppError::BadRequest)` - Not refundable, or amount not in `1..=remaining`
    pub async fn refund(&self, actor: &User, params: RefundParams) -> Result<Transaction, AppError> {
        let repo = TransactionRepository::new(self.db);

        let transaction = repo
            .find_by_id(params.transaction_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

        if !transaction.status.is_refundable() {
            return Err(AppError::BadRequest(format!(
                "Transactions with status '{}' cannot be refunded",
                transaction.status.as_str()
            )));
        }

        let remaining = transaction.refundable_cents();
        let amount = params.amount_cents.unwrap_or(remaining);
        if amount <= 0 {
            return Err(AppError::BadRequest(
                "Refund amount must be positive".to_string(),
            ));
        }
        if amount > remaining {
            return Err(AppError::BadRequest(format!(
                "Refund amount exceeds the refundable amount of {}",
                remaining
            )));
        }

        if let Some(payment_intent_id) = transaction.payment_intent_id.as_deref() {
            if let Err(err) = self.gateway.refund(payment_intent_id, amount).await {
                tracing::warn!(
                    transaction_id = transaction.id,
                    "Gateway refund failed, recording refund locally: {}",
                    err
                );
            }
        }

        let total_refunded = transaction.refund_amount_cents + amount;
        let status = if total_refunded == transaction.amount_cents {
            TransactionStatus::Refunded
        } else {
            TransactionStatus::PartiallyRefunded
        };
        let reason = params
            .reason
            .map(|r| sanitize_text(&r))
            .filter(|r| !r.is_empty());

        let updated = repo
            .apply_refund(transaction.id, total_refunded, status, reason)
            .await?
            .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

        if status == TransactionStatus::Refunded {
            EnrollmentService::new(self.db)
                .revoke(updated.user_id, updated.course_id)
                .await?;
        }

        tracing::info!(
            transaction_id = updated.id,
            amount,
            status = status.as_str(),
            "Refund recorded"
        );

        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(actor.id), "transaction.refund", "transaction")
                    .entity_id(updated.id)
                    .details(json!({
                        "amount_cents": amount,
                        "refund_amount_cents": updated.refund_amount_cents,
                        "status": status.as_str(),
                    })),
            )
            .await?;

        Ok(updated)
    }

    pub async fn list(
        &self,
        filter: TransactionFilter,
        page: PageRequest,
    ) -> Result<Paginated<Transaction>, AppError> {
        Ok(TransactionRepository::new(self.db)
            .get_filtered_paginated(filter, page)
            .await?)
    }

    pub async fn list_for_user(
        &self,
        user: &User,
        page: PageRequest,
    ) -> Result<Paginated<Transaction>, AppError> {
        let filter = TransactionFilter {
            user_id: Some(user.id),
            ..Default::default()
        };

        self.list(filter, page).await
    }

    async fn payment_succeeded(&self, payment_intent_id: &str) -> Result<(), AppError> {
        let repo = TransactionRepository::new(self.db);

        let Some(transaction) = repo.find_by_payment_intent(payment_intent_id).await? else {
            tracing::warn!(payment_intent_id, "Payment succeeded for unknown intent");
            return Ok(());
        };

        let enrollment_service = EnrollmentService::new(self.db);

        match transaction.status {
            TransactionStatus::Pending | TransactionStatus::Failed => {}
            TransactionStatus::Completed
                if self.missing_purchase_enrollment(&transaction).await? =>
            {
                tracing::warn!(
                    transaction_id = transaction.id,
                    "Completed payment has no enrollment, activating"
                );
                enrollment_service
                    .activate_purchase(transaction.user_id, transaction.course_id, transaction.id)
                    .await?;
                return Ok(());
            }
            _ => {
                tracing::debug!(
                    transaction_id = transaction.id,
                    "Payment already settled, ignoring duplicate event"
                );
                return Ok(());
            }
        }

        // Enroll first: a failed enrollment must leave the transaction pending for a retry.
        enrollment_service
            .activate_purchase(transaction.user_id, transaction.course_id, transaction.id)
            .await?;

        repo.set_status(transaction.id, TransactionStatus::Completed, Some(Utc::now()))
            .await?;

        tracing::info!(transaction_id = transaction.id, "Payment completed");

        Ok(())
    }

    /// Whether a completed purchase never produced its enrollment.
    ///
    /// An enrollment the student later revoked still references the transaction and
    /// does not count as missing.
    async fn missing_purchase_enrollment(&self, transaction: &Transaction) -> Result<bool, AppError> {
        let enrollment = EnrollmentRepository::new(self.db)
            .find_by_user_and_course(transaction.user_id, transaction.course_id)
            .await?;

        Ok(match enrollment {
            Some(enrollment) => {
                !enrollment.is_active() && enrollment.transaction_id != Some(transaction.id)
            }
            None => true,
        })
    }

    async fn payment_failed(&self, payment_intent_id: &str) -> Result<(), AppError> {
        let repo = TransactionRepository::new(self.db);

        let Some(transaction) = repo.find_by_payment_intent(payment_intent_id).await? else {
            tracing::warn!(payment_intent_id, "Payment failed for unknown intent");
            return Ok(());
        };

        if transaction.status == TransactionStatus::Pending {
            repo.set_status(transaction.id, TransactionStatus::Failed, None)
                .await?;
            tracing::info!(transaction_id = transaction.id, "Payment failed");
        }

        Ok(())
    }
}
