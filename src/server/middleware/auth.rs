//! Role checks for handlers.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::{
        audit::{event_type, NewSecurityEvent, Severity},
        user::User,
    },
    service::security_event::SecurityEventService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Role `admin`.
    Admin,
    /// Role `instructor` or `admin`.
    Instructor,
}

impl Permission {
    fn is_granted_to(&self, user: &User) -> bool {
        match self {
            Permission::Admin => user.is_admin(),
            Permission::Instructor => user.is_instructor(),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Permission::Admin => "admin",
            Permission::Instructor => "instructor",
        }
    }
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Loads the session user and checks every permission.
    ///
    /// An empty permission list only requires a logged-in user. A denied check is
    /// recorded as an `access_denied` security event.
    ///
    /// # Returns
    /// - `Ok(User)` - Logged-in user holding all permissions
    /// - `Err(AuthError::UserNotInSession)` - Not logged in
    /// - `Err(AuthError::UserNotInDatabase)` - Session refers to a deleted user
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if let Some(missing) = permissions.iter().find(|p| !p.is_granted_to(&user)) {
            let details = format!(
                "Role '{}' lacks '{}' permission",
                user.role.as_str(),
                missing.as_str()
            );

            SecurityEventService::new(self.db)
                .record(
                    NewSecurityEvent::new(event_type::ACCESS_DENIED, Severity::Warning)
                        .user(user.id)
                        .details(details.clone()),
                )
                .await?;

            return Err(AuthError::AccessDenied(user.id, details).into());
        }

        Ok(user)
    }

    /// Session user if someone is logged in, for endpoints that also serve anonymous callers.
    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        let Some(user_id) = AuthSession::new(self.session).user_id().await? else {
            return Ok(None);
        };

        Ok(UserRepository::new(self.db).find_by_id(user_id).await?)
    }
}
