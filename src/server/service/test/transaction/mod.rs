use chrono::Utc;
use sea_orm::{DbBackend, Schema};
use serde_json::json;
use test_utils::{builder::TestBuilder, factory, factory::transaction::TransactionFactory};

use super::FakeGateway;
use crate::server::{
    data::{enrollment::EnrollmentRepository, transaction::TransactionRepository},
    error::{payment::PaymentError, AppError},
    model::{
        audit::{event_type, SecurityEventFilter},
        enrollment::EnrollmentStatus,
        pagination::PageRequest,
        transaction::{RefundParams, TransactionStatus},
        user::User,
    },
    service::{
        enrollment::EnrollmentService,
        payment::webhook::{self, PAYMENT_FAILED, PAYMENT_SUCCEEDED},
        security_event::SecurityEventService,
        transaction::TransactionService,
    },
};

mod refund;

const SECRET: &str = "whsec_test";

/// Builds a signed webhook body for an event on a payment intent.
fn signed_event(event_type: &str, payment_intent_id: &str) -> (Vec<u8>, String) {
    let payload = json!({
        "id": format!("evt_{}", payment_intent_id),
        "type": event_type,
        "data": { "object": { "id": payment_intent_id } },
    })
    .to_string()
    .into_bytes();

    let signature = webhook::sign(&payload, SECRET, Utc::now().timestamp()).unwrap();

    (payload, signature)
}
