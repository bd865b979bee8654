//! SeaORM entity definitions for every LMS table.
//!
//! Each module maps one table. Status and role columns are stored as plain
//! strings and converted to typed enums at the repository boundary in the
//! server crate.

pub mod prelude;

pub mod audit_log;
pub mod course;
pub mod course_tag;
pub mod difficulty_configuration;
pub mod enrollment;
pub mod instructor_application;
pub mod instructor_payout;
pub mod lecture;
pub mod legal_document;
pub mod section;
pub mod security_event;
pub mod system_setting;
pub mod tag;
pub mod transaction;
pub mod upload;
pub mod user;
