use crate::server::{
    data::security_event::SecurityEventRepository,
    error::{auth::AuthError, internal::InternalError, AppError},
    middleware::{auth::AuthGuard, auth::Permission, session::{AuthSession, SESSION_AUTH_USER_ID}},
    model::{audit::SecurityEventFilter, pagination::PageRequest, user::Role},
};
use test_utils::{builder::TestBuilder, factory};

mod require;
