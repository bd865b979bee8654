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
        course::{
            CurriculumDto, LectureDto, LectureInputDto, ReorderSectionsDto, SectionDto,
            SectionInputDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::curriculum::CurriculumService,
        state::AppState,
    },
};

pub static CURRICULUM_TAG: &str = "curriculum";

/// Gets a course with its ordered sections and lectures.
///
/// Content of non-preview lectures is withheld unless the caller owns the course, is an
/// admin, or holds an active enrollment.
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/curriculum",
    tag = CURRICULUM_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course curriculum", body = CurriculumDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_curriculum(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = AuthGuard::new(&state.db, &session).current_user().await?;

    let curriculum = CurriculumService::new(&state.db)
        .get_curriculum(viewer.as_ref(), course_id)
        .await?;

    Ok((StatusCode::OK, Json(curriculum.into_dto())))
}

/// Appends a section to a course the caller owns.
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/sections",
    tag = CURRICULUM_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = SectionInputDto,
    responses(
        (status = 201, description = "Section created", body = SectionDto),
        (status = 400, description = "Invalid title", body = ErrorDto),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_section(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
    Json(payload): Json<SectionInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let section = CurriculumService::new(&state.db)
        .create_section(&instructor, course_id, &payload.title)
        .await?;

    Ok((StatusCode::CREATED, Json(section.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/sections/{section_id}",
    tag = CURRICULUM_TAG,
    params(("section_id" = i32, Path, description = "Section ID")),
    request_body = SectionInputDto,
    responses(
        (status = 200, description = "Section renamed", body = SectionDto),
        (status = 400, description = "Invalid title", body = ErrorDto),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Section not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_section(
    State(state): State<AppState>,
    session: Session,
    Path(section_id): Path<i32>,
    Json(payload): Json<SectionInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let section = CurriculumService::new(&state.db)
        .rename_section(&instructor, section_id, &payload.title)
        .await?;

    Ok((StatusCode::OK, Json(section.into_dto())))
}

/// Deletes a section together with its lectures.
#[utoipa::path(
    delete,
    path = "/api/sections/{section_id}",
    tag = CURRICULUM_TAG,
    params(("section_id" = i32, Path, description = "Section ID")),
    responses(
        (status = 204, description = "Section deleted"),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Section not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_section(
    State(state): State<AppState>,
    session: Session,
    Path(section_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    CurriculumService::new(&state.db)
        .delete_section(&instructor, section_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Reorders the sections of a course.
///
/// The body must list every section of the course exactly once.
#[utoipa::path(
    put,
    path = "/api/courses/{course_id}/sections/order",
    tag = CURRICULUM_TAG,
    params(("course_id" = i32, Path, description = "Course ID")),
    request_body = ReorderSectionsDto,
    responses(
        (status = 200, description = "Sections in their new order", body = Vec<SectionDto>),
        (status = 400, description = "Ids do not match the course sections", body = ErrorDto),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Course not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reorder_sections(
    State(state): State<AppState>,
    session: Session,
    Path(course_id): Path<i32>,
    Json(payload): Json<ReorderSectionsDto>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let sections = CurriculumService::new(&state.db)
        .reorder_sections(&instructor, course_id, payload.section_ids)
        .await?;

    let sections_dto: Vec<SectionDto> = sections.into_iter().map(|s| s.into_dto()).collect();

    Ok((StatusCode::OK, Json(sections_dto)))
}

#[utoipa::path(
    post,
    path = "/api/sections/{section_id}/lectures",
    tag = CURRICULUM_TAG,
    params(("section_id" = i32, Path, description = "Section ID")),
    request_body = LectureInputDto,
    responses(
        (status = 201, description = "Lecture created", body = LectureDto),
        (status = 400, description = "Invalid lecture data", body = ErrorDto),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Section not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_lecture(
    State(state): State<AppState>,
    session: Session,
    Path(section_id): Path<i32>,
    Json(payload): Json<LectureInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let lecture = CurriculumService::new(&state.db)
        .create_lecture(&instructor, section_id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(lecture.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/lectures/{lecture_id}",
    tag = CURRICULUM_TAG,
    params(("lecture_id" = i32, Path, description = "Lecture ID")),
    request_body = LectureInputDto,
    responses(
        (status = 200, description = "Lecture updated", body = LectureDto),
        (status = 400, description = "Invalid lecture data", body = ErrorDto),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Lecture not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_lecture(
    State(state): State<AppState>,
    session: Session,
    Path(lecture_id): Path<i32>,
    Json(payload): Json<LectureInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let lecture = CurriculumService::new(&state.db)
        .update_lecture(&instructor, lecture_id, payload.into())
        .await?;

    Ok((StatusCode::OK, Json(lecture.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/lectures/{lecture_id}",
    tag = CURRICULUM_TAG,
    params(("lecture_id" = i32, Path, description = "Lecture ID")),
    responses(
        (status = 204, description = "Lecture deleted"),
        (status = 403, description = "Not the course owner", body = ErrorDto),
        (status = 404, description = "Lecture not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_lecture(
    State(state): State<AppState>,
    session: Session,
    Path(lecture_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let instructor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    CurriculumService::new(&state.db)
        .delete_lecture(&instructor, lecture_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
