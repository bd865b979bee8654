//! Payment gateway abstraction.
//!
//! Services talk to the gateway through [`PaymentGateway`] so the Stripe client can be
//! swapped for an in-memory fake in tests. Webhook signature checking lives in
//! [`webhook`] and does not need a gateway instance.

use async_trait::async_trait;

use crate::server::error::payment::PaymentError;

pub mod stripe;
pub mod webhook;

/// Request to create a payment intent for a course purchase.
#[derive(Debug, Clone)]
pub struct PaymentIntentRequest {
    pub amount_cents: i64,
    pub currency: String,
    pub user_id: i32,
    pub course_id: i32,
}

/// Payment intent created by the gateway.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;

    /// Refunds part or all of a captured payment intent.
    ///
    /// # Returns
    /// - `Ok(String)` - Gateway id of the refund
    /// - `Err(PaymentError::Gateway)` - The gateway rejected or failed the request
    async fn refund(&self, payment_intent_id: &str, amount_cents: i64)
        -> Result<String, PaymentError>;
}
