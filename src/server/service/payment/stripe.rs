//! Stripe REST client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::server::{
    error::payment::PaymentError,
    service::payment::{PaymentGateway, PaymentIntent, PaymentIntentRequest},
};

pub const DEFAULT_STRIPE_API_URL: &str = "https://api.stripe.com/v1";

#[derive(Clone)]
pub struct StripeGateway {
    http_client: reqwest::Client,
    api_url: String,
    secret_key: String,
}

#[derive(Deserialize)]
struct PaymentIntentResponse {
    id: String,
    client_secret: String,
}

#[derive(Deserialize)]
struct RefundResponse {
    id: String,
}

#[derive(Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl StripeGateway {
    pub fn new(http_client: reqwest::Client, api_url: String, secret_key: String) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            secret_key,
        }
    }

    async fn post_form<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<T, PaymentError> {
        let response = self
            .http_client
            .post(format!("{}/{}", self.api_url, path))
            .bearer_auth(&self.secret_key)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| status.to_string());
            return Err(PaymentError::Gateway(message));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let form = [
            ("amount", request.amount_cents.to_string()),
            ("currency", request.currency),
            ("metadata[user_id]", request.user_id.to_string()),
            ("metadata[course_id]", request.course_id.to_string()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
        ];

        let intent: PaymentIntentResponse = self.post_form("payment_intents", &form).await?;

        Ok(PaymentIntent {
            id: intent.id,
            client_secret: intent.client_secret,
        })
    }

    async fn refund(
        &self,
        payment_intent_id: &str,
        amount_cents: i64,
    ) -> Result<String, PaymentError> {
        let form = [
            ("payment_intent", payment_intent_id.to_string()),
            ("amount", amount_cents.to_string()),
        ];

        let refund: RefundResponse = self.post_form("refunds", &form).await?;

        Ok(refund.id)
    }
}
