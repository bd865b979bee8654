//! Small helpers shared across layers.

pub mod time;
pub mod validation;
