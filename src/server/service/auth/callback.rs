use oauth2::{
    basic::BasicTokenType, AuthorizationCode, EmptyExtraTokenFields, StandardTokenResponse,
    TokenResponse,
};
use serde::Deserialize;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{UpsertUserParam, User},
    service::auth::AuthService,
    util::validation::{sanitize_text, validate_email},
};

/// Subset of the OpenID Connect userinfo response.
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl<'a> AuthService<'a> {
    /// Completes the OAuth2 flow and returns the local user.
    ///
    /// # Arguments
    /// - `authorization_code` - Code returned by the provider on the callback URL
    /// - `grant_admin` - Whether the login carried a valid bootstrap admin code
    ///
    /// # Returns
    /// - `Ok(User)` - Created or updated user
    /// - `Err(AppError::AuthErr)` - Token exchange failed
    /// - `Err(AppError::BadRequest)` - Provider returned an unusable email address
    /// - `Err(AppError::ReqwestErr)` - Userinfo request failed
    pub async fn callback(
        &self,
        authorization_code: String,
        grant_admin: bool,
    ) -> Result<User, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let info = self.fetch_user_info(&token).await?;
        let param = Self::upsert_param(info, grant_admin)?;

        let user = UserRepository::new(self.db).upsert(param).await?;

        tracing::info!(user_id = user.id, role = user.role.as_str(), "User logged in");

        Ok(user)
    }

    async fn fetch_user_info(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<UserInfo, AppError> {
        let info = self
            .http_client
            .get(self.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<UserInfo>()
            .await?;

        Ok(info)
    }

    /// Validates provider data and derives the display name.
    ///
    /// Falls back to the local part of the email address when the provider sends no name.
    pub fn upsert_param(info: UserInfo, grant_admin: bool) -> Result<UpsertUserParam, AppError> {
        let email = info.email.trim().to_ascii_lowercase();
        if !validate_email(&email) {
            return Err(AppError::BadRequest(
                "Identity provider returned an invalid email address".to_string(),
            ));
        }

        let name = info
            .name
            .map(|n| sanitize_text(&n))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

        Ok(UpsertUserParam {
            external_id: info.sub,
            email,
            name,
            grant_admin,
        })
    }
}
