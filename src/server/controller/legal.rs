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
        api::ErrorDto,
        legal::{CreateLegalDocumentDto, LegalDocumentDto, RenderedLegalDocumentDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        service::legal::LegalService,
        state::AppState,
    },
};

pub static LEGAL_TAG: &str = "legal";

#[derive(Deserialize)]
pub struct LegalQueryParams {
    #[serde(rename = "type")]
    pub document_type: String,
}

/// Active version of a legal document, rendered to HTML.
#[utoipa::path(
    get,
    path = "/api/legal/{document_type}",
    tag = LEGAL_TAG,
    params(("document_type" = String, Path, description = "e.g. terms, privacy")),
    responses(
        (status = 200, description = "Active document", body = RenderedLegalDocumentDto),
        (status = 404, description = "No active document of this type", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_legal_document(
    State(state): State<AppState>,
    Path(document_type): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let document = LegalService::new(&state.db)
        .get_active(&document_type)
        .await?;

    Ok((StatusCode::OK, Json(document.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/admin/legal",
    tag = LEGAL_TAG,
    params(("type" = String, Query, description = "Document type")),
    responses(
        (status = 200, description = "All versions, newest first", body = Vec<LegalDocumentDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_legal_documents(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<LegalQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let documents = LegalService::new(&state.db)
        .list(&params.document_type)
        .await?;

    let documents_dto: Vec<LegalDocumentDto> =
        documents.into_iter().map(|d| d.into_dto()).collect();

    Ok((StatusCode::OK, Json(documents_dto)))
}

/// Creates an inactive document version.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `201 Created` - New version, not yet active
/// - `400 Bad Request` - Invalid type, version, title or content
/// - `409 Conflict` - Version already exists for the type
#[utoipa::path(
    post,
    path = "/api/admin/legal",
    tag = LEGAL_TAG,
    request_body = CreateLegalDocumentDto,
    responses(
        (status = 201, description = "Document created", body = LegalDocumentDto),
        (status = 400, description = "Invalid document", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "Version exists", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_legal_document(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateLegalDocumentDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let document = LegalService::new(&state.db)
        .create(&admin, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(document.into_dto())))
}

/// Makes a version the active one for its type, deactivating the previous one.
#[utoipa::path(
    post,
    path = "/api/admin/legal/{document_id}/activate",
    tag = LEGAL_TAG,
    params(("document_id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document activated", body = LegalDocumentDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn activate_legal_document(
    State(state): State<AppState>,
    session: Session,
    Path(document_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let document = LegalService::new(&state.db)
        .activate(&admin, document_id)
        .await?;

    Ok((StatusCode::OK, Json(document.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/admin/legal/{document_id}",
    tag = LEGAL_TAG,
    params(("document_id" = i32, Path, description = "Document ID")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Document not found", body = ErrorDto),
        (status = 400, description = "Document is active", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_legal_document(
    State(state): State<AppState>,
    session: Session,
    Path(document_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    LegalService::new(&state.db)
        .delete(&admin, document_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
