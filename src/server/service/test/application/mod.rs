use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        application::{ApplicationStatus, SubmitApplicationParams},
        user::{Role, User},
    },
    service::application::ApplicationService,
};

mod review;
mod submit;

fn params() -> SubmitApplicationParams {
    SubmitApplicationParams {
        bio: "I teach systems programming".to_string(),
        expertise: "Rust, embedded".to_string(),
        website: Some("https://example.com".to_string()),
    }
}
