use std::sync::Arc;

use auth::Authenticator;
use auth::InMemoryRevocationStore;
use auth::RevocationStore;
use notes_service::config::Config;
use notes_service::config::RevocationBackend;
use notes_service::domain::note::service::NoteService;
use notes_service::domain::session::service::SessionService;
use notes_service::inbound::http::router::create_router;
use notes_service::outbound::repositories::PostgresNoteRepository;
use notes_service::outbound::repositories::PostgresRevocationStore;
use notes_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "notes-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_ttl_seconds = config.jwt.access_token_ttl_seconds,
        revocation_backend = ?config.revocation.backend,
        "Configuration loaded"
    );

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

    let revocation_store: Arc<dyn RevocationStore> = match config.revocation.backend {
        RevocationBackend::Memory => Arc::new(InMemoryRevocationStore::new()),
        RevocationBackend::Postgres => Arc::new(PostgresRevocationStore::new(pg_pool.clone())),
    };

    let authenticator = Arc::new(
        Authenticator::new(
            config.jwt.secret.as_bytes(),
            config.jwt.access_token_ttl_seconds,
            revocation_store,
        )
        .inspect_err(|e| tracing::error!(error = %e, "Invalid authentication configuration"))?,
    );

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let note_repository = Arc::new(PostgresNoteRepository::new(pg_pool));

    let session_service = Arc::new(SessionService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));
    let note_service = Arc::new(NoteService::new(note_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(session_service, note_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
