use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use goal_service::config::Config;
use goal_service::config::StorageBackend;
use goal_service::domain::goal::ports::GoalServicePort;
use goal_service::domain::goal::service::GoalService;
use goal_service::domain::identity::ports::IdentityServicePort;
use goal_service::domain::identity::service::IdentityService;
use goal_service::inbound::http::router::create_router;
use goal_service::outbound::repositories::InMemoryGoalRepository;
use goal_service::outbound::repositories::InMemoryIdentityRepository;
use goal_service::outbound::repositories::PostgresGoalRepository;
use goal_service::outbound::repositories::PostgresIdentityRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "goal_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "goal-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        backend = ?config.database.backend,
        http_port = config.server.http_port,
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.expiration_hours,
    ));

    let identity_service: Arc<dyn IdentityServicePort>;
    let goal_service: Arc<dyn GoalServicePort>;

    match config.database.backend {
        StorageBackend::Postgres => {
            let url = config
                .database
                .url
                .as_deref()
                .context("database.url is required for the postgres backend")?;

            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let identity_repository = Arc::new(PostgresIdentityRepository::new(pg_pool.clone()));
            let goal_repository = Arc::new(PostgresGoalRepository::new(pg_pool));

            identity_service = Arc::new(IdentityService::new(
                identity_repository,
                Arc::clone(&authenticator),
            ));
            goal_service = Arc::new(GoalService::new(goal_repository));
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on shutdown");

            identity_service = Arc::new(IdentityService::new(
                Arc::new(InMemoryIdentityRepository::new()),
                Arc::clone(&authenticator),
            ));
            goal_service = Arc::new(GoalService::new(Arc::new(InMemoryGoalRepository::new())));
        }
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(identity_service, goal_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    Ok(())
}
