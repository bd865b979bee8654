use crate::server::{data::enrollment::EnrollmentRepository, model::enrollment::EnrollmentStatus};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
