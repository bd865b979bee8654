use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    model::{
        setting::{DEFAULT_COMMISSION_RATE_KEY, FALLBACK_COMMISSION_RATE_BPS},
        user::User,
    },
    service::setting::SettingService,
};

mod upsert;
