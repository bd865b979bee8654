use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    model::{taxonomy::DifficultyParams, user::User},
    service::taxonomy::TaxonomyService,
};

mod difficulty;
mod tag;

fn level(level: &str, sort_order: i32) -> DifficultyParams {
    DifficultyParams {
        level: level.to_string(),
        display_name: level.to_uppercase(),
        sort_order,
        description: None,
    }
}
