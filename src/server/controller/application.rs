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
        application::{InstructorApplicationDto, RejectApplicationDto, SubmitApplicationDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{application::ApplicationStatus, pagination::PageRequest},
        service::application::ApplicationService,
        state::AppState,
    },
};

pub static APPLICATION_TAG: &str = "application";

#[derive(Deserialize)]
pub struct ApplicationQueryParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub status: Option<String>,
}

fn default_entries() -> u64 {
    10
}

/// Submits an application to become an instructor.
///
/// # Access Control
/// - Any logged in student
///
/// # Returns
/// - `201 Created` - Pending application
/// - `400 Bad Request` - Missing fields or the user is not a student
/// - `409 Conflict` - A pending application already exists
#[utoipa::path(
    post,
    path = "/api/applications",
    tag = APPLICATION_TAG,
    request_body = SubmitApplicationDto,
    responses(
        (status = 201, description = "Application submitted", body = InstructorApplicationDto),
        (status = 400, description = "Invalid application", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 409, description = "Pending application exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_application(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SubmitApplicationDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let application = ApplicationService::new(&state.db)
        .submit(&user, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(application.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/applications/mine",
    tag = APPLICATION_TAG,
    responses(
        (status = 200, description = "Caller's applications, newest first", body = Vec<InstructorApplicationDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_own_applications(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let applications = ApplicationService::new(&state.db).list_own(&user).await?;

    let applications_dto: Vec<InstructorApplicationDto> =
        applications.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(applications_dto)))
}

#[utoipa::path(
    get,
    path = "/api/admin/applications",
    tag = APPLICATION_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number, starting at 0"),
        ("entries" = Option<u64>, Query, description = "Entries per page"),
        ("status" = Option<String>, Query, description = "pending, approved or rejected")
    ),
    responses(
        (status = 200, description = "Applications", body = PaginatedDto<InstructorApplicationDto>),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_applications(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ApplicationQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let status = params
        .status
        .as_deref()
        .map(|s| {
            ApplicationStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown application status '{}'", s)))
        })
        .transpose()?;

    let applications = ApplicationService::new(&state.db)
        .list(status, PageRequest::new(params.page, params.entries))
        .await?;

    Ok((StatusCode::OK, Json(applications.into_dto(|a| a.into_dto()))))
}

/// Approves a pending application and promotes the applicant to instructor.
#[utoipa::path(
    post,
    path = "/api/admin/applications/{application_id}/approve",
    tag = APPLICATION_TAG,
    params(("application_id" = i32, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application approved", body = InstructorApplicationDto),
        (status = 400, description = "Application is not pending", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_application(
    State(state): State<AppState>,
    session: Session,
    Path(application_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let application = ApplicationService::new(&state.db)
        .approve(&admin, application_id)
        .await?;

    Ok((StatusCode::OK, Json(application.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/admin/applications/{application_id}/reject",
    tag = APPLICATION_TAG,
    params(("application_id" = i32, Path, description = "Application ID")),
    request_body = RejectApplicationDto,
    responses(
        (status = 200, description = "Application rejected", body = InstructorApplicationDto),
        (status = 400, description = "Missing reason or application is not pending", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Application not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_application(
    State(state): State<AppState>,
    session: Session,
    Path(application_id): Path<i32>,
    Json(payload): Json<RejectApplicationDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let application = ApplicationService::new(&state.db)
        .reject(&admin, application_id, &payload.reason)
        .await?;

    Ok((StatusCode::OK, Json(application.into_dto())))
}
