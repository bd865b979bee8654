//! Application state shared across all request handlers.
//!
//! The state is built once at startup and cloned into every handler through axum's
//! `State` extractor, so every field is cheap to clone.

use std::{path::PathBuf, sync::Arc};

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;

use crate::server::service::{bootstrap::BootstrapCodeService, payment::PaymentGateway};

/// OAuth2 client with authorization and token endpoints configured.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// Connection pool; clones share the pool.
    pub db: DatabaseConnection,

    /// HTTP client for the identity provider and payment gateway. Redirects are disabled.
    pub http_client: reqwest::Client,

    pub oauth_client: OAuth2Client,

    /// OpenID userinfo endpoint queried after the token exchange.
    pub userinfo_url: String,

    /// One-time admin code issued at startup while no admin exists.
    pub bootstrap_code_service: BootstrapCodeService,

    pub payment_gateway: Arc<dyn PaymentGateway>,

    /// Secret used to verify `Stripe-Signature` headers.
    pub webhook_secret: String,

    /// Frontend URL users are redirected to after login.
    pub app_url: String,

    /// Root directory for chunked uploads.
    pub upload_dir: PathBuf,

    /// Largest accepted upload in bytes.
    pub max_upload_size: i64,
}
