use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, user::UserDto},
    server::{
        controller::client_ip,
        error::{auth::AuthError, AppError},
        middleware::{
            auth::AuthGuard,
            session::{AuthSession, CsrfSession, OAuthFlowSession},
        },
        model::audit::{event_type, NewSecurityEvent, Severity},
        service::{auth::AuthService, security_event::SecurityEventService},
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

#[derive(Deserialize)]
pub struct LoginParams {
    /// Bootstrap admin code printed at startup.
    pub code: Option<String>,
}

/// Query parameters for the OAuth callback endpoint.
#[derive(Deserialize)]
pub struct CallbackParams {
    /// CSRF state token to be validated against the session value.
    pub state: String,
    /// Authorization code exchanged for an access token.
    pub code: String,
}

/// Redirects to the identity provider's login page.
///
/// A valid bootstrap `code` marks the flow so the callback grants the admin role. An
/// invalid or expired code is ignored and the login proceeds normally.
///
/// # Returns
/// - `307 Temporary Redirect` - To the provider authorization URL
#[utoipa::path(
    get,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    params(
        ("code" = Option<String>, Query, description = "Bootstrap admin code")
    ),
    responses(
        (status = 307, description = "Redirect to the identity provider"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<LoginParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.userinfo_url,
    );

    let grant_admin = match params.code {
        Some(code) => state.bootstrap_code_service.validate_and_consume(&code).await,
        None => false,
    };
    if grant_admin {
        tracing::info!("Valid bootstrap code presented, admin role will be granted on login");
    }

    let (url, csrf_token) = auth_service.login_url();

    CsrfSession::new(&session)
        .set_token(csrf_token.secret().clone())
        .await?;
    OAuthFlowSession::new(&session)
        .set_grant_admin(grant_admin)
        .await?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Completes the OAuth login and redirects to the application.
///
/// # Returns
/// - `307 Temporary Redirect` - To `APP_URL` with the user logged in
/// - `400 Bad Request` - CSRF state mismatch
/// - `500 Internal Server Error` - Token exchange or userinfo failure
#[utoipa::path(
    get,
    path = "/api/auth/callback",
    tag = AUTH_TAG,
    params(
        ("state" = String, Query, description = "CSRF state token"),
        ("code" = String, Query, description = "Authorization code")
    ),
    responses(
        (status = 307, description = "Redirect to the application"),
        (status = 400, description = "CSRF validation failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let ip = client_ip(&headers);
    let security_events = SecurityEventService::new(&state.db);

    let stored = CsrfSession::new(&session).take_token().await?;
    if stored.as_deref() != Some(params.state.as_str()) {
        security_events
            .record(
                NewSecurityEvent::new(event_type::CSRF_FAILURE, Severity::Warning)
                    .ip(ip)
                    .details("OAuth callback state did not match the session"),
            )
            .await?;

        return Err(AuthError::CsrfValidationFailed.into());
    }

    let grant_admin = OAuthFlowSession::new(&session).take_grant_admin().await?;

    let auth_service = AuthService::new(
        &state.db,
        &state.http_client,
        &state.oauth_client,
        &state.userinfo_url,
    );
    let user = auth_service.callback(params.code, grant_admin).await?;

    AuthSession::new(&session).login(user.id).await?;

    security_events
        .record(
            NewSecurityEvent::new(event_type::LOGIN_SUCCESS, Severity::Info)
                .user(user.id)
                .ip(ip),
        )
        .await?;

    Ok(Redirect::temporary(&state.app_url))
}

/// Logs the current user out.
///
/// # Returns
/// - `204 No Content` - Session cleared
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out")
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the logged-in user.
///
/// # Returns
/// - `200 OK` - Current user
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}
