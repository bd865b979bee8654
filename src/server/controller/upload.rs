use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        upload::{InitUploadDto, UploadDto, UploadStatusDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::upload::InitUploadParams,
        service::upload::UploadService,
        state::AppState,
    },
};

pub static UPLOAD_TAG: &str = "upload";

/// Starts a chunked upload.
///
/// # Access Control
/// - `Instructor`
///
/// # Returns
/// - `201 Created` - Upload id and chunk layout
/// - `400 Bad Request` - Invalid filename, size, chunk size or digest
#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = UPLOAD_TAG,
    request_body = InitUploadDto,
    responses(
        (status = 201, description = "Upload started", body = UploadDto),
        (status = 400, description = "Invalid upload", body = ErrorDto),
        (status = 403, description = "Not an instructor", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn init_upload(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<InitUploadDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let upload = UploadService::new(&state.db, &state.upload_dir, state.max_upload_size)
        .init(
            &user,
            InitUploadParams {
                filename: payload.filename,
                total_size: payload.total_size,
                chunk_size: payload.chunk_size,
                sha256: payload.sha256,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(upload.into_dto())))
}

/// Stores one chunk. The body is the raw chunk bytes; chunks may arrive in any order.
#[utoipa::path(
    put,
    path = "/api/uploads/{upload_id}/chunks/{index}",
    tag = UPLOAD_TAG,
    params(
        ("upload_id" = String, Path, description = "Upload ID"),
        ("index" = i32, Path, description = "Zero-based chunk index")
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 204, description = "Chunk stored"),
        (status = 400, description = "Index out of range, wrong length or upload finished", body = ErrorDto),
        (status = 403, description = "Upload belongs to another user", body = ErrorDto),
        (status = 404, description = "Upload not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn put_chunk(
    State(state): State<AppState>,
    session: Session,
    Path((upload_id, index)): Path<(String, i32)>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    UploadService::new(&state.db, &state.upload_dir, state.max_upload_size)
        .put_chunk(&user, &upload_id, index, &body)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/uploads/{upload_id}",
    tag = UPLOAD_TAG,
    params(("upload_id" = String, Path, description = "Upload ID")),
    responses(
        (status = 200, description = "Upload with received chunk indices", body = UploadStatusDto),
        (status = 403, description = "Upload belongs to another user", body = ErrorDto),
        (status = 404, description = "Upload not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_upload(
    State(state): State<AppState>,
    session: Session,
    Path(upload_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let (upload, received_chunks) =
        UploadService::new(&state.db, &state.upload_dir, state.max_upload_size)
            .status(&user, &upload_id)
            .await?;

    Ok((
        StatusCode::OK,
        Json(UploadStatusDto {
            upload: upload.into_dto(),
            received_chunks,
        }),
    ))
}

/// Assembles the received chunks and verifies size and SHA-256.
#[utoipa::path(
    post,
    path = "/api/uploads/{upload_id}/complete",
    tag = UPLOAD_TAG,
    params(("upload_id" = String, Path, description = "Upload ID")),
    responses(
        (status = 200, description = "Upload completed", body = UploadDto),
        (status = 400, description = "Missing chunks, failed integrity check or upload finished", body = ErrorDto),
        (status = 403, description = "Upload belongs to another user", body = ErrorDto),
        (status = 404, description = "Upload not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn complete_upload(
    State(state): State<AppState>,
    session: Session,
    Path(upload_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Instructor])
        .await?;

    let upload = UploadService::new(&state.db, &state.upload_dir, state.max_upload_size)
        .complete(&user, &upload_id)
        .await?;

    Ok((StatusCode::OK, Json(upload.into_dto())))
}
