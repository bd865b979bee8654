use chrono::{Duration, TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory, factory::transaction::TransactionFactory};

use crate::server::{
    data::transaction::TransactionRepository,
    model::{
        pagination::PageRequest,
        transaction::{TransactionFilter, TransactionStatus},
    },
};

mod get_settled_in_range;
