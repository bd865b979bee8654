use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum PaymentError {
    /// The `Stripe-Signature` header is missing, malformed, stale or does not match.
    ///
    /// Results in a 400 Bad Request response.
    #[error("Invalid webhook signature: {0}")]
    InvalidSignature(String),

    /// The webhook body could not be parsed as an event.
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    /// The payment gateway rejected the request or could not be reached.
    ///
    /// Results in a 502 Bad Gateway response.
    #[error("Payment gateway error: {0}")]
    Gateway(String),
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        PaymentError::Gateway(err.to_string())
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidSignature(_) | Self::InvalidPayload(_) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto::new(self.to_string()))).into_response()
            }
            Self::Gateway(msg) => {
                tracing::error!("Payment gateway error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorDto::new("Payment provider unavailable")),
                )
                    .into_response()
            }
        }
    }
}
