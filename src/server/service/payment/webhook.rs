//! Stripe webhook payloads and signature verification.
//!
//! The `Stripe-Signature` header looks like `t=1700000000,v1=<hex>,v1=<hex>`. Each `v1` is
//! an HMAC-SHA256 over `"{t}.{payload}"` keyed with the endpoint secret; one match within
//! the timestamp tolerance is enough.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::server::error::payment::PaymentError;

type HmacSha256 = Hmac<Sha256>;

/// Maximum age of a signed webhook in seconds.
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

pub const PAYMENT_SUCCEEDED: &str = "payment_intent.succeeded";
pub const PAYMENT_FAILED: &str = "payment_intent.payment_failed";

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEventData {
    pub object: serde_json::Value,
}

impl WebhookEvent {
    pub fn parse(payload: &[u8]) -> Result<Self, PaymentError> {
        serde_json::from_slice(payload).map_err(|e| PaymentError::InvalidPayload(e.to_string()))
    }

    /// Id of the object the event is about, e.g. the payment intent id.
    pub fn object_id(&self) -> Result<&str, PaymentError> {
        self.data
            .object
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or_else(|| PaymentError::InvalidPayload("Event object has no id".to_string()))
    }
}

/// Verifies a `Stripe-Signature` header against the raw request body.
///
/// # Arguments
/// - `payload` - Raw request body, exactly as received
/// - `header` - Value of the `Stripe-Signature` header
/// - `secret` - Webhook endpoint secret
/// - `now` - Current unix time in seconds
/// - `tolerance_secs` - Accepted distance between `now` and the signed timestamp
///
/// # Returns
/// - `Ok(())` - At least one `v1` signature matches and the timestamp is fresh
/// - `Err(PaymentError::InvalidSignature)` - Malformed header, stale timestamp or no match
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
    tolerance_secs: i64,
) -> Result<(), PaymentError> {
    let mut timestamp: Option<i64> = None;
    let mut signatures: Vec<Vec<u8>> = Vec::new();

    for part in header.split(',') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => timestamp = value.parse().ok(),
            "v1" => {
                if let Ok(bytes) = hex::decode(value) {
                    signatures.push(bytes);
                }
            }
            _ => {}
        }
    }

    let timestamp = timestamp
        .ok_or_else(|| PaymentError::InvalidSignature("Missing timestamp".to_string()))?;
    if signatures.is_empty() {
        return Err(PaymentError::InvalidSignature(
            "Missing v1 signature".to_string(),
        ));
    }
    if now.abs_diff(timestamp) > tolerance_secs.unsigned_abs() {
        return Err(PaymentError::InvalidSignature(
            "Timestamp outside tolerance".to_string(),
        ));
    }

    let mac = signed_payload_mac(payload, secret, timestamp)?;
    if signatures
        .iter()
        .any(|signature| mac.clone().verify_slice(signature).is_ok())
    {
        Ok(())
    } else {
        Err(PaymentError::InvalidSignature(
            "No matching signature".to_string(),
        ))
    }
}

/// Builds a valid header for `payload`, as the gateway would send it.
pub fn sign(payload: &[u8], secret: &str, timestamp: i64) -> Result<String, PaymentError> {
    let signature = signed_payload_mac(payload, secret, timestamp)?
        .finalize()
        .into_bytes();

    Ok(format!("t={},v1={}", timestamp, hex::encode(signature)))
}

fn signed_payload_mac(payload: &[u8], secret: &str, timestamp: i64) -> Result<HmacSha256, PaymentError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PaymentError::InvalidSignature(e.to_string()))?;
    mac.update(format!("{}.", timestamp).as_bytes());
    mac.update(payload);
    Ok(mac)
}
