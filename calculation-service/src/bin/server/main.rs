use std::str::FromStr;
use std::sync::Arc;

use auth::TokenService;
use calculation_service::config::Config;
use calculation_service::domain::calculation::service::CalculationService;
use calculation_service::domain::user::service::AccountService;
use calculation_service::inbound::http::router::create_router;
use calculation_service::outbound::repositories::SqliteCalculationRepository;
use calculation_service::outbound::repositories::SqliteUserRepository;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calculation_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "calculation-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        token_minutes = config.auth.token_minutes,
        "Configuration loaded"
    );

    let connect_options =
        SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "sqlite",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let token_service = Arc::new(TokenService::new(
        config.auth.secret.as_bytes(),
        config.auth.token_minutes,
    ));
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let calculation_repository = Arc::new(SqliteCalculationRepository::new(pool));

    let account_service = Arc::new(AccountService::new(user_repository));
    let calculation_service = Arc::new(CalculationService::new(calculation_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, calculation_service, token_service);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
