use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    model::user::{Role, User},
    service::user::UserService,
};

mod set_commission_rate;
mod set_role;
