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
        course::CourseDto,
        taxonomy::{DifficultyDto, DifficultyInputDto, TagDto, TagInputDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::taxonomy::TaxonomyService,
        state::AppState,
    },
};

pub static TAXONOMY_TAG: &str = "taxonomy";

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = TAXONOMY_TAG,
    responses(
        (status = 200, description = "All tags ordered by name", body = Vec<TagDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tags(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let tags = TaxonomyService::new(&state.db).list_tags().await?;

    let tags_dto: Vec<TagDto> = tags.into_iter().map(|t| t.into_dto()).collect();

    Ok((StatusCode::OK, Json(tags_dto)))
}

/// Creates a tag; names are unique ignoring case.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    post,
    path = "/api/admin/tags",
    tag = TAXONOMY_TAG,
    request_body = TagInputDto,
    responses(
        (status = 201, description = "Tag created", body = TagDto),
        (status = 400, description = "Invalid name", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "Tag already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_tag(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<TagInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let tag = TaxonomyService::new(&state.db)
        .create_tag(&admin, &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(tag.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/admin/tags/{tag_id}",
    tag = TAXONOMY_TAG,
    params(("tag_id" = i32, Path, description = "Tag ID")),
    request_body = TagInputDto,
    responses(
        (status = 200, description = "Tag renamed", body = TagDto),
        (status = 400, description = "Invalid name", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Tag not found", body = ErrorDto),
        (status = 409, description = "Tag already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_tag(
    State(state): State<AppState>,
    session: Session,
    Path(tag_id): Path<i32>,
    Json(payload): Json<TagInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let tag = TaxonomyService::new(&state.db)
        .rename_tag(&admin, tag_id, &payload.name)
        .await?;

    Ok((StatusCode::OK, Json(tag.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/admin/tags/{tag_id}",
    tag = TAXONOMY_TAG,
    params(("tag_id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Tag not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    session: Session,
    Path(tag_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    TaxonomyService::new(&state.db)
        .delete_tag(&admin, tag_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Adds a tag to a course the caller owns.
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/tags/{tag_id}",
    tag = TAXONOMY_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("tag_id" = i32, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Course with its tags", body = CourseDto),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Course or tag not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_tag(
    State(state): State<AppState>,
    session: Session,
    Path((course_id, tag_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let course = TaxonomyService::new(&state.db)
        .assign_tag(&instructor, course_id, tag_id)
        .await?;

    Ok((StatusCode::OK, Json(course.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/tags/{tag_id}",
    tag = TAXONOMY_TAG,
    params(
        ("course_id" = i32, Path, description = "Course ID"),
        ("tag_id" = i32, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Course with its tags", body = CourseDto),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Course or tag not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unassign_tag(
    State(state): State<AppState>,
    session: Session,
    Path((course_id, tag_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let course = TaxonomyService::new(&state.db)
        .unassign_tag(&instructor, course_id, tag_id)
        .await?;

    Ok((StatusCode::OK, Json(course.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/difficulties",
    tag = TAXONOMY_TAG,
    responses(
        (status = 200, description = "Difficulty levels by sort order", body = Vec<DifficultyDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_difficulties(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let difficulties = TaxonomyService::new(&state.db).list_difficulties().await?;

    let difficulties_dto: Vec<DifficultyDto> =
        difficulties.into_iter().map(|d| d.into_dto()).collect();

    Ok((StatusCode::OK, Json(difficulties_dto)))
}

#[utoipa::path(
    post,
    path = "/api/admin/difficulties",
    tag = TAXONOMY_TAG,
    request_body = DifficultyInputDto,
    responses(
        (status = 201, description = "Difficulty created", body = DifficultyDto),
        (status = 400, description = "Invalid level or display name", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "Level already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_difficulty(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<DifficultyInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let difficulty = TaxonomyService::new(&state.db)
        .create_difficulty(&admin, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(difficulty.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/admin/difficulties/{difficulty_id}",
    tag = TAXONOMY_TAG,
    params(("difficulty_id" = i32, Path, description = "Difficulty ID")),
    request_body = DifficultyInputDto,
    responses(
        (status = 200, description = "Difficulty updated", body = DifficultyDto),
        (status = 400, description = "Invalid level or display name", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Difficulty not found", body = ErrorDto),
        (status = 409, description = "Level already exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_difficulty(
    State(state): State<AppState>,
    session: Session,
    Path(difficulty_id): Path<i32>,
    Json(payload): Json<DifficultyInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let difficulty = TaxonomyService::new(&state.db)
        .update_difficulty(&admin, difficulty_id, payload.into())
        .await?;

    Ok((StatusCode::OK, Json(difficulty.into_dto())))
}

/// Deletes a difficulty level no course uses.
#[utoipa::path(
    delete,
    path = "/api/admin/difficulties/{difficulty_id}",
    tag = TAXONOMY_TAG,
    params(("difficulty_id" = i32, Path, description = "Difficulty ID")),
    responses(
        (status = 204, description = "Difficulty deleted"),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Difficulty not found", body = ErrorDto),
        (status = 409, description = "Difficulty in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_difficulty(
    State(state): State<AppState>,
    session: Session,
    Path(difficulty_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    TaxonomyService::new(&state.db)
        .delete_difficulty(&admin, difficulty_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
