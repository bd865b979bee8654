//! One-time code that lets the first user sign in as admin.
//!
//! When the server starts without any admin account it generates a random code, logs a
//! login URL containing it and keeps it in memory for a short time. A login carrying the
//! code flags the OAuth flow so the callback grants the admin role. The code is consumed
//! on first successful use.

use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// How long a bootstrap code stays valid.
pub const BOOTSTRAP_CODE_TTL: Duration = Duration::from_secs(60);

const CODE_LENGTH: usize = 32;
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Clone)]
struct IssuedCode {
    value: String,
    expires_at: Instant,
}

impl IssuedCode {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory holder of the bootstrap admin code.
///
/// Cloning shares the stored code, so the instance kept in `AppState` and the one used at
/// startup see the same value.
#[derive(Clone)]
pub struct BootstrapCodeService {
    code: Arc<RwLock<Option<IssuedCode>>>,
    ttl: Duration,
}

impl BootstrapCodeService {
    pub fn new() -> Self {
        Self::with_ttl(BOOTSTRAP_CODE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            code: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Generates a fresh random code, replacing any previous one.
    ///
    /// # Returns
    /// - `String` - The 32-character alphanumeric code
    pub async fn generate(&self) -> String {
        let value = random_code();

        *self.code.write().await = Some(IssuedCode {
            value: value.clone(),
            expires_at: Instant::now() + self.ttl,
        });

        value
    }

    /// Checks `input` against the stored code and consumes it on a match.
    ///
    /// An expired code is dropped and never matches. A wrong guess leaves a valid code in
    /// place.
    ///
    /// # Returns
    /// - `true` - The code matched and has been consumed
    /// - `false` - No code, expired code, or mismatch
    pub async fn validate_and_consume(&self, input: &str) -> bool {
        let mut code = self.code.write().await;

        match code.as_ref() {
            Some(issued) if issued.is_expired() => {
                *code = None;
                false
            }
            Some(issued) if issued.value == input => {
                *code = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for BootstrapCodeService {
    fn default() -> Self {
        Self::new()
    }
}

fn random_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
