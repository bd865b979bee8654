use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::AppError,
    model::{
        audit::{AuditEntry, AuditFilter},
        pagination::PageRequest,
    },
    service::audit::AuditService,
};

mod list;
mod record;
