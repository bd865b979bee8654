//! Request-level helpers shared by controllers: session wrappers and role checks.

pub mod auth;
pub mod session;
