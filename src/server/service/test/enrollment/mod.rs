use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::enrollment::EnrollmentRepository,
    error::AppError,
    model::{enrollment::EnrollmentStatus, user::User},
    service::enrollment::EnrollmentService,
};

mod unenroll;
mod update_progress;
