mod model;
mod server;

use std::{net::SocketAddr, sync::Arc};

use axum::http::{header, HeaderValue, Method};
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    service::{bootstrap::BootstrapCodeService, payment::{stripe::StripeGateway, PaymentGateway}},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;

    let bootstrap_code_service = BootstrapCodeService::new();

    // Check for admin users and generate login link if none exist
    startup::check_for_admin(&db, &config, &bootstrap_code_service).await?;

    let payment_gateway: Arc<dyn PaymentGateway> = Arc::new(StripeGateway::new(
        http_client.clone(),
        config.stripe_api_url.clone(),
        config.stripe_secret_key.clone(),
    ));

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let governor_config = startup::setup_rate_limit()?;

    let app_origin = config
        .app_url
        .trim_end_matches('/')
        .parse::<HeaderValue>()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: "APP_URL".to_string(),
            value: config.app_url.clone(),
        })?;
    let cors = CorsLayer::new()
        .allow_origin(app_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let state = AppState {
        db,
        http_client,
        oauth_client,
        userinfo_url: config.oauth_userinfo_url.clone(),
        bootstrap_code_service,
        payment_gateway,
        webhook_secret: config.stripe_webhook_secret.clone(),
        app_url: config.app_url.clone(),
        upload_dir: config.upload_dir.clone(),
        max_upload_size: config.max_upload_size,
    };

    let app = server::router::router()
        .with_state(state)
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(Arc::new(governor_config)));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("Starting server on {}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
