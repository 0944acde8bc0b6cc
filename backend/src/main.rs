//! Backend entry-point: configuration, migrations, and HTTP wiring.

mod server;

use std::sync::Arc;

use actix_web::web;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use placeholder_backend::domain::PlaceholderRefreshService;
use placeholder_backend::inbound::http::health::HealthState;
use placeholder_backend::inbound::http::HttpState;
use placeholder_backend::outbound::jsonplaceholder::JsonPlaceholderHttpSource;
use placeholder_backend::outbound::persistence::{
    DbPool, DieselUserDocumentRepository, PoolConfig,
};

use server::AppConfig;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    run_migrations(&config.database_url).await?;

    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(std::io::Error::other)?;
    let repository = Arc::new(DieselUserDocumentRepository::new(pool));
    let source = Arc::new(
        JsonPlaceholderHttpSource::with_options(
            config.placeholder_base_url.clone(),
            config.placeholder_timeout,
            config.placeholder_user_limit,
        )
        .map_err(std::io::Error::other)?,
    );
    let refresh = Arc::new(PlaceholderRefreshService::new(source, repository.clone()));
    let http_state = HttpState::new(repository, refresh);

    let health_state = web::Data::new(HealthState::new());
    let http_server = server::run(&config, http_state, health_state.clone())?;

    info!(addr = %config.bind_addr, "server listening");
    health_state.mark_ready();
    http_server.await
}

async fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let database_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = diesel::PgConnection::establish(&database_url).map_err(|e| {
            std::io::Error::other(format!("database connection for migrations failed: {e}"))
        })?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|applied| {
                if !applied.is_empty() {
                    info!(count = applied.len(), "applied pending migrations");
                }
            })
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))
    })
    .await
    .map_err(std::io::Error::other)?
}
