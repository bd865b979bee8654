//! Typed wrappers around the login session.
//!
//! Each wrapper owns a group of session keys so handlers never spell key names or value
//! types themselves:
//! - `AuthSession` - id of the logged-in user
//! - `CsrfSession` - CSRF state of a pending OAuth login
//! - `OAuthFlowSession` - whether the pending login should be granted admin

use tower_sessions::Session;

use crate::server::error::{internal::InternalError, AppError};

pub(crate) const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";
const SESSION_AUTH_GRANT_ADMIN: &str = "auth:grant_admin";

pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the id of the user who just logged in.
    ///
    /// The session id is cycled first so a session fixed before login cannot be reused.
    pub async fn login(&self, user_id: i32) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session
            .insert(SESSION_AUTH_USER_ID, user_id.to_string())
            .await?;
        Ok(())
    }

    /// Id of the logged-in user.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - A user is logged in
    /// - `Ok(None)` - Anonymous session
    /// - `Err(AppError)` - Session store failure or a corrupt stored id
    pub async fn user_id(&self) -> Result<Option<i32>, AppError> {
        let Some(raw) = self.session.get::<String>(SESSION_AUTH_USER_ID).await? else {
            return Ok(None);
        };

        let user_id = raw
            .parse::<i32>()
            .map_err(|source| InternalError::SessionUserId { value: raw, source })?;

        Ok(Some(user_id))
    }

    /// Removes all session data, logging the user out.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Removes and returns the stored token so it can be checked only once.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        Ok(self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?)
    }
}

pub struct OAuthFlowSession<'a> {
    session: &'a Session,
}

impl<'a> OAuthFlowSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Records that the login carried a valid bootstrap admin code.
    pub async fn set_grant_admin(&self, grant_admin: bool) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_GRANT_ADMIN, grant_admin)
            .await?;
        Ok(())
    }

    /// Removes and returns the admin flag; `false` when unset.
    pub async fn take_grant_admin(&self) -> Result<bool, AppError> {
        Ok(self
            .session
            .remove(SESSION_AUTH_GRANT_ADMIN)
            .await?
            .unwrap_or(false))
    }
}
