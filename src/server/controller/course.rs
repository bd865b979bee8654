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
        course::{CourseDto, CreateCourseDto, UpdateCourseDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{course::CourseFilter, pagination::PageRequest},
        service::course::CourseService,
        state::AppState,
    },
};

/// Tag for grouping course endpoints in OpenAPI documentation
pub static COURSE_TAG: &str = "course";

#[derive(Deserialize)]
pub struct CatalogueParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    /// Tag slug.
    pub tag: Option<String>,
    pub difficulty_id: Option<i32>,
    pub instructor_id: Option<i32>,
}

fn default_entries() -> u64 {
    10
}

/// Lists published courses, newest first.
///
/// # Access Control
/// - Public
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = COURSE_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)"),
        ("tag" = Option<String>, Query, description = "Only courses with this tag slug"),
        ("difficulty_id" = Option<i32>, Query, description = "Only courses of this difficulty"),
        ("instructor_id" = Option<i32>, Query, description = "Only courses of this instructor")
    ),
    responses(
        (status = 200, description = "Page of published courses", body = PaginatedDto<CourseDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<CatalogueParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = CourseFilter {
        tag_slug: params.tag,
        difficulty_id: params.difficulty_id,
        instructor_id: params.instructor_id,
    };

    let courses = CourseService::new(&state.db)
        .list_published(filter, PageRequest::new(params.page, params.entries))
        .await?;

    Ok((StatusCode::OK, Json(courses.into_dto(|c| c.into_dto()))))
}

/// Gets a course by id.
///
/// Unpublished courses are only visible to their owner, admins and enrolled students.
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course", body = CourseDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_course(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).current_user().await?;

    let course = CourseService::new(&state.db)
        .get(viewer.as_ref(), course_id)
        .await?;

    Ok((StatusCode::OK, Json(course.into_dto())))
}

/// Creates a draft course owned by the caller.
///
/// # Access Control
/// - `Instructor`
///
/// # Returns
/// - `201 Created` - New draft course
/// - `400 Bad Request` - Invalid title, price, currency or difficulty
#[utoipa::path(
    post,
    path = "/api/courses",
    tag = COURSE_TAG,
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = CourseDto),
        (status = 400, description = "Invalid course data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an instructor", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_course(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let course = CourseService::new(&state.db)
        .create(&instructor, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(course.into_dto())))
}

/// Updates a course the caller owns.
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = CourseDto),
        (status = 400, description = "Invalid course data", body = ErrorDto),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_course(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
    Json(payload): Json<UpdateCourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let course = CourseService::new(&state.db)
        .update(&instructor, course_id, payload.into())
        .await?;

    Ok((StatusCode::OK, Json(course.into_dto())))
}

/// Deletes a course without enrollments or sales.
///
/// # Returns
/// - `204 No Content` - Deleted
/// - `409 Conflict` - Course has enrollments or transactions
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 409, description = "Course has enrollments", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_course(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    CourseService::new(&state.db)
        .delete(&instructor, course_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Publishes a draft or archived course with at least one lecture.
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/publish",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course published", body = CourseDto),
        (status = 400, description = "Already published or empty curriculum", body = ErrorDto),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn publish_course(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let course = CourseService::new(&state.db)
        .publish(&instructor, course_id)
        .await?;

    Ok((StatusCode::OK, Json(course.into_dto())))
}

/// Archives a published course.
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/archive",
    tag = COURSE_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course archived", body = CourseDto),
        (status = 400, description = "Course is not published", body = ErrorDto),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn archive_course(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let course = CourseService::new(&state.db)
        .archive(&instructor, course_id)
        .await?;

    Ok((StatusCode::OK, Json(course.into_dto())))
}

/// Lists every course of the caller regardless of status.
#[utoipa::path(
    get,
    path = "/api/instructor/courses",
    tag = COURSE_TAG,
    responses(
        (status = 200, description = "Own courses", body = Vec<CourseDto>),
        (status = 403, description = "Not an instructor", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_own_courses(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let courses = CourseService::new(&state.db).list_own(&instructor).await?;

    let courses_dto: Vec<CourseDto> = courses.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(courses_dto)))
}
