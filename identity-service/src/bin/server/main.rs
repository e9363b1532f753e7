use std::sync::Arc;

use auth::TokenIssuer;
use identity_service::config::Config;
use identity_service::domain::account::service::AccountService;
use identity_service::domain::profile::service::ProfileService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::mapping::DirectAddressMapper;
use identity_service::outbound::repositories::PostgresIdentityStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_issuer = %config.jwt.issuer,
        jwt_audience = %config.jwt.audience,
        token_lifetime_days = config.jwt.duration_in_days,
        "Configuration loaded"
    );

    // Fails on a weak signing key before anything else is opened.
    let token_issuer = Arc::new(TokenIssuer::new(&config.jwt)?);

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let identity_store = Arc::new(PostgresIdentityStore::new(pg_pool));

    let account_service = Arc::new(AccountService::new(
        Arc::clone(&identity_store),
        Arc::clone(&token_issuer),
    ));
    let profile_service = Arc::new(ProfileService::new(
        identity_store,
        Arc::new(DirectAddressMapper),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, profile_service, token_issuer);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
