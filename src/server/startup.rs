//! Initialization of the database, sessions and outbound clients.

use governor::middleware::NoOpMiddleware;
use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_governor::{
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::SmartIpKeyExtractor,
};
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{config::ConfigError, AppError},
    model::audit::{event_type, NewSecurityEvent, Severity},
    service::{bootstrap::BootstrapCodeService, security_event::SecurityEventService},
    state::OAuth2Client,
};

/// Sessions expire after a week without requests.
const SESSION_INACTIVITY_DAYS: i64 = 7;

/// One request is refilled per client address every this many milliseconds (10/s).
const RATE_LIMIT_REFILL_MS: u64 = 100;
const RATE_LIMIT_BURST: u32 = 50;

/// Connects to the Sqlite database and runs pending migrations.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// The session table is created on first start.
pub async fn connect_to_session(
    db: &DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let store = SqliteStore::new(db.get_sqlite_connection_pool().clone());
    store
        .migrate()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to migrate session store: {}", e)))?;

    Ok(SessionManagerLayer::new(store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_INACTIVITY_DAYS))))
}

/// HTTP client used for the identity provider and payment gateway.
///
/// Redirects are disabled so a malicious upstream cannot bounce requests elsewhere.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}

pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let client = BasicClient::new(ClientId::new(config.oauth_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.oauth_client_secret.clone()))
        .set_auth_uri(
            AuthUrl::new(config.oauth_auth_url.clone())
                .map_err(|_| invalid("OAUTH_AUTH_URL", &config.oauth_auth_url))?,
        )
        .set_token_uri(
            TokenUrl::new(config.oauth_token_url.clone())
                .map_err(|_| invalid("OAUTH_TOKEN_URL", &config.oauth_token_url))?,
        )
        .set_redirect_uri(
            RedirectUrl::new(config.oauth_redirect_url.clone())
                .map_err(|_| invalid("OAUTH_REDIRECT_URL", &config.oauth_redirect_url))?,
        );

    Ok(client)
}

/// Issues a bootstrap admin code when no admin account exists.
///
/// The login URL containing the code is logged so the operator can claim the first
/// admin account. Nothing happens once an admin exists.
pub async fn check_for_admin(
    db: &DatabaseConnection,
    config: &Config,
    bootstrap_code_service: &BootstrapCodeService,
) -> Result<(), AppError> {
    if UserRepository::new(db).admin_exists().await? {
        return Ok(());
    }

    let code = bootstrap_code_service.generate().await;
    let login_url = format!(
        "{}/api/auth/login?code={}",
        config.app_url.trim_end_matches('/'),
        code
    );

    SecurityEventService::new(db)
        .record(
            NewSecurityEvent::new(event_type::ADMIN_BOOTSTRAP, Severity::Info)
                .details("Bootstrap admin code issued"),
        )
        .await?;

    tracing::info!(
        "No admin account exists. Log in within 60 seconds to claim admin: {}",
        login_url
    );

    Ok(())
}

/// Per-address rate limit: bursts of 50 requests, refilled at 10 per second.
pub fn setup_rate_limit(
) -> Result<GovernorConfig<SmartIpKeyExtractor, NoOpMiddleware>, AppError> {
    GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_millisecond(RATE_LIMIT_REFILL_MS)
        .burst_size(RATE_LIMIT_BURST)
        .finish()
        .ok_or_else(|| AppError::InternalError("Invalid rate limit configuration".to_string()))
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
    }
}
