//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//! All database queries, inserts, updates, and deletes are performed through these repositories.

pub mod application;
pub mod audit_log;
pub mod course;
pub mod curriculum;
pub mod difficulty;
pub mod enrollment;
pub mod legal_document;
pub mod payout;
pub mod security_event;
pub mod setting;
pub mod tag;
pub mod transaction;
pub mod upload;
pub mod user;

#[cfg(test)]
mod test;
