//! Backend entry-point: loads settings, wires the event store, and serves
//! the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use events_backend::inbound::http::health::HealthState;
use events_backend::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use events_backend::settings::AppSettings;

use server::{ServerConfig, create_server, session_settings_from_process_env};

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

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let session = session_settings_from_process_env()?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        settings.bind_addr.as_str(),
        settings.cors_origin.as_str(),
    );

    if let Some(database_url) = settings.database_url() {
        apply_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections),
        )
        .await
        .map_err(std::io::Error::other)?;
        info!("connected to PostgreSQL event store");
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
