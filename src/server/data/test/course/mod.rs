use crate::server::{
    data::course::CourseRepository,
    model::{
        course::{CourseFilter, CourseStatus},
        pagination::PageRequest,
    },
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod get_published_paginated;
mod set_status;
