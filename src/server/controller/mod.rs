//! HTTP handlers.
//!
//! Handlers check access with `AuthGuard`, convert DTOs into service parameters, call
//! one service and convert the result back into DTOs.

pub mod analytics;
pub mod application;
pub mod audit;
pub mod auth;
pub mod course;
pub mod curriculum;
pub mod enrollment;
pub mod health;
pub mod legal;
pub mod payout;
pub mod setting;
pub mod tax;
pub mod taxonomy;
pub mod transaction;
pub mod upload;
pub mod user;

use axum::http::HeaderMap;
use serde::Deserialize;

use crate::server::model::pagination::PageRequest;

#[derive(Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    10
}

impl PaginationParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.entries)
    }
}

/// Client address from the first `X-Forwarded-For` hop, when behind a proxy.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
}
