use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;

use crate::server::{
    error::payment::PaymentError,
    service::payment::{PaymentGateway, PaymentIntent, PaymentIntentRequest},
};

mod analytics;
mod application;
mod audit;
mod curriculum;
mod enrollment;
mod legal;
mod payout;
mod setting;
mod taxonomy;
mod transaction;
mod upload;
mod user;

/// In-memory gateway handing out sequential intent ids.
#[derive(Default)]
pub struct FakeGateway {
    counter: AtomicU64,
    fail_refunds: AtomicBool,
}

impl FakeGateway {
    pub fn failing_refunds() -> Self {
        let gateway = Self::default();
        gateway.fail_refunds.store(true, Ordering::SeqCst);
        gateway
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_payment_intent(
        &self,
        _request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;

        Ok(PaymentIntent {
            id: format!("pi_fake_{}", n),
            client_secret: format!("pi_fake_{}_secret", n),
        })
    }

    async fn refund(
        &self,
        payment_intent_id: &str,
        _amount_cents: i64,
    ) -> Result<String, PaymentError> {
        if self.fail_refunds.load(Ordering::SeqCst) {
            return Err(PaymentError::Gateway("card network unavailable".to_string()));
        }

        Ok(format!("re_{}", payment_intent_id))
    }
}
