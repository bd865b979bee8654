//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They validate input,
//! enforce ownership and status rules, coordinate several repositories, call the payment
//! gateway and write audit entries. Each service borrows the database connection for the
//! duration of a request and returns `AppError`.

pub mod analytics;
pub mod application;
pub mod audit;
pub mod auth;
pub mod bootstrap;
pub mod commission;
pub mod course;
pub mod curriculum;
pub mod enrollment;
pub mod legal;
pub mod payment;
pub mod payout;
pub mod security_event;
pub mod setting;
pub mod tax;
pub mod taxonomy;
pub mod transaction;
pub mod upload;
pub mod user;

#[cfg(test)]
mod test;
