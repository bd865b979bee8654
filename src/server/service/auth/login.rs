use oauth2::{CsrfToken, Scope};
use url::Url;

use crate::server::service::auth::AuthService;

impl<'a> AuthService<'a> {
    /// Builds the provider authorization URL and the CSRF token to keep in the session.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_scope(Scope::new("profile".to_string()))
            .url()
    }
}
