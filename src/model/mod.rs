//! Request and response DTOs shared by the HTTP API.
//!
//! These types define the JSON wire format. Server-side domain models convert into
//! them at the controller boundary with `into_dto()`.

pub mod analytics;
pub mod api;
pub mod application;
pub mod audit;
pub mod course;
pub mod enrollment;
pub mod legal;
pub mod payout;
pub mod setting;
pub mod taxonomy;
pub mod transaction;
pub mod upload;
pub mod user;
