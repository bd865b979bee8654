use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        audit::{AuditLogDto, SecurityEventDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{
            audit::{AuditFilter, SecurityEventFilter},
            pagination::PageRequest,
        },
        service::{audit::AuditService, security_event::SecurityEventService},
        state::AppState,
    },
};

pub static AUDIT_TAG: &str = "audit";

#[derive(Deserialize)]
pub struct AuditQueryParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub actor_id: Option<i32>,
    pub entity_type: Option<String>,
}

#[derive(Deserialize)]
pub struct SecurityEventQueryParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub event_type: Option<String>,
    pub severity: Option<String>,
}

fn default_entries() -> u64 {
    50
}

/// Audit trail of administrative changes, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/audit-logs",
    tag = AUDIT_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number, starting at 0"),
        ("entries" = Option<u64>, Query, description = "Entries per page"),
        ("actor_id" = Option<i32>, Query, description = "Acting user"),
        ("entity_type" = Option<String>, Query, description = "e.g. course, instructor_payout")
    ),
    responses(
        (status = 200, description = "Audit entries", body = PaginatedDto<AuditLogDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_audit_logs(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<AuditQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let logs = AuditService::new(&state.db)
        .list(
            AuditFilter {
                actor_id: params.actor_id,
                entity_type: params.entity_type,
            },
            PageRequest::new(params.page, params.entries),
        )
        .await?;

    Ok((StatusCode::OK, Json(logs.into_dto(|l| l.into_dto()))))
}

#[utoipa::path(
    get,
    path = "/api/admin/security-events",
    tag = AUDIT_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number, starting at 0"),
        ("entries" = Option<u64>, Query, description = "Entries per page"),
        ("event_type" = Option<String>, Query, description = "e.g. login_success, access_denied"),
        ("severity" = Option<String>, Query, description = "info, warning or critical")
    ),
    responses(
        (status = 200, description = "Security events", body = PaginatedDto<SecurityEventDto>),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_security_events(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SecurityEventQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let events = SecurityEventService::new(&state.db)
        .list(
            SecurityEventFilter {
                event_type: params.event_type,
                severity: params.severity,
            },
            PageRequest::new(params.page, params.entries),
        )
        .await?;

    Ok((StatusCode::OK, Json(events.into_dto(|e| e.into_dto()))))
}
