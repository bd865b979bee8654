use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        setting::{SystemSettingDto, UpsertSettingDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::setting::SettingService,
        state::AppState,
    },
};

pub static SETTING_TAG: &str = "setting";

#[utoipa::path(
    get,
    path = "/api/admin/settings",
    tag = SETTING_TAG,
    responses(
        (status = 200, description = "All settings ordered by key", body = Vec<SystemSettingDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_settings(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let settings = SettingService::new(&state.db).get_all().await?;

    let settings_dto: Vec<SystemSettingDto> =
        settings.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(settings_dto)))
}

#[utoipa::path(
    get,
    path = "/api/admin/settings/{key}",
    tag = SETTING_TAG,
    params(("key" = String, Path, description = "Setting key")),
    responses(
        (status = 200, description = "Setting", body = SystemSettingDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Setting not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_setting(
    State(state): State<AppState>,
    session: Session,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let setting = SettingService::new(&state.db).get(&key).await?;

    Ok((StatusCode::OK, Json(setting.into_dto())))
}

/// Creates or replaces a setting.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - Stored setting
/// - `400 Bad Request` - Invalid key, or a value the key does not accept
#[utoipa::path(
    put,
    path = "/api/admin/settings/{key}",
    tag = SETTING_TAG,
    params(("key" = String, Path, description = "Setting key")),
    request_body = UpsertSettingDto,
    responses(
        (status = 200, description = "Setting stored", body = SystemSettingDto),
        (status = 400, description = "Invalid key or value", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upsert_setting(
    State(state): State<AppState>,
    session: Session,
    Path(key): Path<String>,
    Json(payload): Json<UpsertSettingDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let setting = SettingService::new(&state.db)
        .upsert(&admin, &key, &payload.value, payload.description)
        .await?;

    Ok((StatusCode::OK, Json(setting.into_dto())))
}
