use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        user::{SetCommissionRateDto, SetRoleDto, UserDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::user::UserService,
        state::AppState,
    },
};

pub static USER_TAG: &str = "user";

/// Lists all users ordered by name.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = USER_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Page of users", body = PaginatedDto<UserDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let users = UserService::new(&state.db)
        .list(params.page_request())
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto(|u| u.into_dto()))))
}

/// Changes a user's role.
///
/// Admins cannot change their own role.
///
/// # Returns
/// - `200 OK` - Updated user
/// - `400 Bad Request` - Unknown role or own account
/// - `404 Not Found` - No such user
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/role",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = SetRoleDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Invalid role change", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_user_role(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<SetRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .set_role(&admin, user_id, &payload.role)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Sets or clears an instructor's commission override in basis points.
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/commission",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = SetCommissionRateDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Rate outside 0..=10000", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_user_commission(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<SetCommissionRateDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = UserService::new(&state.db)
        .set_commission_rate(&admin, user_id, payload.commission_rate_bps)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
