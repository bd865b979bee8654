use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        analytics::{EarningsDto, RevenueBucketDto, RevenueSummaryDto, TopCourseDto},
        api::ErrorDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::analytics::Granularity,
        service::{analytics::AnalyticsService, commission::CommissionService},
        state::AppState,
    },
};

pub static ANALYTICS_TAG: &str = "analytics";

/// Inclusive start and exclusive end date of a report.
#[derive(Deserialize)]
pub struct RangeParams {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
pub struct RevenueParams {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// `day`, `week` or `month`.
    #[serde(default = "default_granularity")]
    pub granularity: String,
}

fn default_granularity() -> String {
    "day".to_string()
}

#[derive(Deserialize)]
pub struct TopCoursesParams {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub limit: Option<u64>,
}

/// Earnings of the calling instructor from sales completed in `[start, end)`.
#[utoipa::path(
    get,
    path = "/api/instructor/earnings",
    tag = ANALYTICS_TAG,
    params(
        ("start" = NaiveDate, Query, description = "First day, inclusive"),
        ("end" = NaiveDate, Query, description = "Last day, exclusive")
    ),
    responses(
        (status = 200, description = "Earnings with per-course breakdown", body = EarningsDto),
        (status = 400, description = "Invalid date range", body = ErrorDto),
        (status = 403, description = "Not an instructor", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_own_earnings(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let earnings = CommissionService::new(&state.db)
        .earnings(instructor.id, params.start, params.end)
        .await?;

    Ok((StatusCode::OK, Json(earnings.into_dto())))
}

/// Earnings of any instructor.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/instructors/{instructor_id}/earnings",
    tag = ANALYTICS_TAG,
    params(
        ("instructor_id" = i32, Path, description = "Instructor user ID"),
        ("start" = NaiveDate, Query, description = "First day, inclusive"),
        ("end" = NaiveDate, Query, description = "Last day, exclusive")
    ),
    responses(
        (status = 200, description = "Earnings with per-course breakdown", body = EarningsDto),
        (status = 400, description = "Invalid date range", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Instructor not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_instructor_earnings(
    State(state): State<AppState>,
    session: Session,
    Path(instructor_id): Path<i32>,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let earnings = CommissionService::new(&state.db)
        .earnings(instructor_id, params.start, params.end)
        .await?;

    Ok((StatusCode::OK, Json(earnings.into_dto())))
}

/// Platform revenue totals for `[start, end)`.
#[utoipa::path(
    get,
    path = "/api/admin/analytics/summary",
    tag = ANALYTICS_TAG,
    params(
        ("start" = NaiveDate, Query, description = "First day, inclusive"),
        ("end" = NaiveDate, Query, description = "Last day, exclusive")
    ),
    responses(
        (status = 200, description = "Revenue summary", body = RevenueSummaryDto),
        (status = 400, description = "Invalid date range", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_revenue_summary(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RangeParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let summary = AnalyticsService::new(&state.db)
        .summary(params.start, params.end)
        .await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

/// Revenue split into day, week or month buckets.
#[utoipa::path(
    get,
    path = "/api/admin/analytics/revenue",
    tag = ANALYTICS_TAG,
    params(
        ("start" = NaiveDate, Query, description = "First day, inclusive"),
        ("end" = NaiveDate, Query, description = "Last day, exclusive"),
        ("granularity" = Option<String>, Query, description = "day, week or month (default: day)")
    ),
    responses(
        (status = 200, description = "Revenue buckets", body = Vec<RevenueBucketDto>),
        (status = 400, description = "Invalid range or granularity", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_revenue_by_period(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<RevenueParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let granularity = Granularity::parse(&params.granularity).ok_or_else(|| {
        AppError::BadRequest(format!("Unknown granularity '{}'", params.granularity))
    })?;

    let buckets = AnalyticsService::new(&state.db)
        .revenue_by_period(params.start, params.end, granularity)
        .await?;

    let buckets_dto: Vec<RevenueBucketDto> = buckets.into_iter().map(|b| b.into_dto()).collect();

    Ok((StatusCode::OK, Json(buckets_dto)))
}

/// Best selling courses by net revenue.
#[utoipa::path(
    get,
    path = "/api/admin/analytics/top-courses",
    tag = ANALYTICS_TAG,
    params(
        ("start" = NaiveDate, Query, description = "First day, inclusive"),
        ("end" = NaiveDate, Query, description = "Last day, exclusive"),
        ("limit" = Option<u64>, Query, description = "1 to 100 (default: 10)")
    ),
    responses(
        (status = 200, description = "Ranked courses", body = Vec<TopCourseDto>),
        (status = 400, description = "Invalid range or limit", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_top_courses(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<TopCoursesParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let courses = AnalyticsService::new(&state.db)
        .top_courses(params.start, params.end, params.limit)
        .await?;

    let courses_dto: Vec<TopCourseDto> = courses.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(courses_dto)))
}
