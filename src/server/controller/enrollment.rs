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
        enrollment::{EnrollmentDto, UpdateProgressDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::enrollment::EnrollmentService,
        state::AppState,
    },
};

pub static ENROLLMENT_TAG: &str = "enrollment";

/// Enrolls the caller in a free published course.
///
/// # Returns
/// - `201 Created` - Active enrollment
/// - `400 Bad Request` - Course is paid or owned by the caller
/// - `404 Not Found` - Course missing or unpublished
/// - `409 Conflict` - Already enrolled
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/enroll",
    tag = ENROLLMENT_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentDto),
        (status = 400, description = "Course requires checkout or is own course", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 409, description = "Already enrolled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn enroll(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let enrollment = EnrollmentService::new(&state.db)
        .enroll_free(&user, course_id)
        .await?;

    Ok((StatusCode::CREATED, Json(enrollment.into_dto())))
}

/// Leaves a course.
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/enroll",
    tag = ENROLLMENT_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Unenrolled"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Not enrolled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unenroll(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    EnrollmentService::new(&state.db)
        .unenroll(&user, course_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/enrollments",
    tag = ENROLLMENT_TAG,
    responses(
        (status = 200, description = "Caller's enrollments", body = Vec<EnrollmentDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_enrollments(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let enrollments = EnrollmentService::new(&state.db).list_mine(&user).await?;

    let enrollments_dto: Vec<EnrollmentDto> =
        enrollments.into_iter().map(|e| e.into_dto()).collect();

    Ok((StatusCode::OK, Json(enrollments_dto)))
}

#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/progress",
    tag = ENROLLMENT_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Enrollment with progress", body = EnrollmentDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Not enrolled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_progress(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let enrollment = EnrollmentService::new(&state.db)
        .get_progress(&user, course_id)
        .await?;

    Ok((StatusCode::OK, Json(enrollment.into_dto())))
}

/// Sets course progress; 100 marks the course completed.
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}/progress",
    tag = ENROLLMENT_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = UpdateProgressDto,
    responses(
        (status = 200, description = "Progress updated", body = EnrollmentDto),
        (status = 400, description = "Progress outside 0..=100", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Not enrolled", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_progress(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
    Json(payload): Json<UpdateProgressDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let enrollment = EnrollmentService::new(&state.db)
        .update_progress(&user, course_id, payload.progress_percent)
        .await?;

    Ok((StatusCode::OK, Json(enrollment.into_dto())))
}
