//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.
//! Status columns are stored as strings and parsed into enums here, so services only
//! ever match on typed values.

pub mod analytics;
pub mod application;
pub mod audit;
pub mod course;
pub mod enrollment;
pub mod legal;
pub mod pagination;
pub mod payout;
pub mod setting;
pub mod taxonomy;
pub mod transaction;
pub mod upload;
pub mod user;
