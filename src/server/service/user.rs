//! User administration: listing accounts, changing roles and commission overrides.

use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::{
        audit::AuditEntry,
        pagination::{PageRequest, Paginated},
        user::{Role, User},
    },
    service::audit::AuditService,
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Users ordered alphabetically by name.
    pub async fn list(&self, page: PageRequest) -> Result<Paginated<User>, AppError> {
        Ok(UserRepository::new(self.db).get_all_paginated(page).await?)
    }

    /// Changes a user's role.
    ///
    /// # Arguments
    /// - `actor` - Admin performing the change
    /// - `user_id` - User whose role changes
    /// - `role` - `student`, `instructor` or `admin`
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::BadRequest)` - Unknown role, or an admin changing their own role
    /// - `Err(AppError::NotFound)` - No such user
    pub async fn set_role(&self, actor: &User, user_id: i32, role: &str) -> Result<User, AppError> {
        let role = Role::parse(role)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown role '{}'", role)))?;

        if actor.id == user_id {
            return Err(AppError::BadRequest(
                "Admins cannot change their own role".to_string(),
            ));
        }

        let user = UserRepository::new(self.db)
            .set_role(user_id, role)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!(actor = actor.id, user_id, role = role.as_str(), "Role changed");

        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(actor.id), "user.set_role", "user")
                    .entity_id(user_id)
                    .details(json!({ "role": role.as_str() })),
            )
            .await?;

        Ok(user)
    }

    /// Sets or clears the commission override of a user.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::BadRequest)` - Rate outside `0..=10000` basis points
    /// - `Err(AppError::NotFound)` - No such user
    pub async fn set_commission_rate(
        &self,
        actor: &User,
        user_id: i32,
        rate_bps: Option<i32>,
    ) -> Result<User, AppError> {
        if let Some(rate) = rate_bps {
            if !(0..=10_000).contains(&rate) {
                return Err(AppError::BadRequest(
                    "Commission rate must be between 0 and 10000 basis points".to_string(),
                ));
            }
        }

        let user = UserRepository::new(self.db)
            .set_commission_rate(user_id, rate_bps)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        AuditService::new(self.db)
            .record(
                AuditEntry::new(Some(actor.id), "user.set_commission_rate", "user")
                    .entity_id(user_id)
                    .details(json!({ "commission_rate_bps": rate_bps })),
            )
            .await?;

        Ok(user)
    }
}
