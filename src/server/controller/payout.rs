use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        payout::{CreatePayoutDto, MarkFailedDto, MarkPaidDto, PayoutDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            pagination::PageRequest,
            payout::{CreatePayoutParams, PayoutStatus},
        },
        service::payout::PayoutService,
        state::AppState,
    },
};

pub static PAYOUT_TAG: &str = "payout";

#[derive(Deserialize)]
pub struct PayoutQueryParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub instructor_id: Option<i32>,
    pub status: Option<String>,
}

fn default_entries() -> u64 {
    10
}

/// Creates a pending payout of an instructor's earnings for `[period_start, period_end)`.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - Pending payout
/// - `400 Bad Request` - Empty period, user is not an instructor, or nothing earned
/// - `409 Conflict` - Period overlaps an active payout
#[utoipa::path(
    post,
    path = "/api/admin/payouts",
    tag = PAYOUT_TAG,
    request_body = CreatePayoutDto,
    responses(
        (status = 201, description = "Payout created", body = PayoutDto),
        (status = 400, description = "Invalid payout", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Instructor not found", body = ErrorDto),
        (status = 409, description = "Overlapping payout", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_payout(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreatePayoutDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let payout = PayoutService::new(&state.db)
        .create(
            &admin,
            CreatePayoutParams {
                instructor_id: payload.instructor_id,
                period_start: payload.period_start,
                period_end: payload.period_end,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(payout.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/admin/payouts/{payout_id}/process",
    tag = PAYOUT_TAG,
    params(("payout_id" = i32, Path, description = "Payout ID")),
    responses(
        (status = 200, description = "Payout processing", body = PayoutDto),
        (status = 400, description = "Invalid status transition", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Payout not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn process_payout(
    State(state): State<AppState>,
    session: Session,
    Path(payout_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let payout = PayoutService::new(&state.db)
        .process(&admin, payout_id)
        .await?;

    Ok((StatusCode::OK, Json(payout.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/admin/payouts/{payout_id}/pay",
    tag = PAYOUT_TAG,
    params(("payout_id" = i32, Path, description = "Payout ID")),
    request_body = MarkPaidDto,
    responses(
        (status = 200, description = "Payout paid", body = PayoutDto),
        (status = 400, description = "Invalid status transition", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Payout not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn pay_payout(
    State(state): State<AppState>,
    session: Session,
    Path(payout_id): Path<i32>,
    Json(payload): Json<MarkPaidDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let payout = PayoutService::new(&state.db)
        .pay(&admin, payout_id, payload.external_reference)
        .await?;

    Ok((StatusCode::OK, Json(payout.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/admin/payouts/{payout_id}/fail",
    tag = PAYOUT_TAG,
    params(("payout_id" = i32, Path, description = "Payout ID")),
    request_body = MarkFailedDto,
    responses(
        (status = 200, description = "Payout failed", body = PayoutDto),
        (status = 400, description = "Missing reason or invalid status transition", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Payout not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn fail_payout(
    State(state): State<AppState>,
    session: Session,
    Path(payout_id): Path<i32>,
    Json(payload): Json<MarkFailedDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let payout = PayoutService::new(&state.db)
        .fail(&admin, payout_id, &payload.reason)
        .await?;

    Ok((StatusCode::OK, Json(payout.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/admin/payouts/{payout_id}/cancel",
    tag = PAYOUT_TAG,
    params(("payout_id" = i32, Path, description = "Payout ID")),
    responses(
        (status = 200, description = "Payout cancelled", body = PayoutDto),
        (status = 400, description = "Invalid status transition", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Payout not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_payout(
    State(state): State<AppState>,
    session: Session,
    Path(payout_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let payout = PayoutService::new(&state.db)
        .cancel(&admin, payout_id)
        .await?;

    Ok((StatusCode::OK, Json(payout.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/admin/payouts",
    tag = PAYOUT_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)"),
        ("instructor_id" = Option<i32>, Query, description = "Instructor"),
        ("status" = Option<String>, Query, description = "Payout status")
    ),
    responses(
        (status = 200, description = "Page of payouts", body = PaginatedDto<PayoutDto>),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_payouts(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PayoutQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let status = match params.status.as_deref() {
        Some(value) => Some(PayoutStatus::parse(value).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown payout status '{}'", value))
        })?),
        None => None,
    };

    let payouts = PayoutService::new(&state.db)
        .list(
            params.instructor_id,
            status,
            PageRequest::new(params.page, params.entries),
        )
        .await?;

    Ok((StatusCode::OK, Json(payouts.into_dto(|p| p.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/instructor/payouts",
    tag = PAYOUT_TAG,
    responses(
        (status = 200, description = "Own payouts", body = Vec<PayoutDto>),
        (status = 403, description = "Not an instructor", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_own_payouts(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let payouts = PayoutService::new(&state.db).list_own(&instructor).await?;

    let payouts_dto: Vec<PayoutDto> = payouts.into_iter().map(|p| p.into_dto()).collect();

    Ok((StatusCode::OK, Json(payouts_dto)))
}
