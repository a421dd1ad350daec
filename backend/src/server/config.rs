//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use events_backend::inbound::http::session_config::{
    BuildMode, SessionSettings, session_settings_from_env,
};
use events_backend::outbound::persistence::DbPool;

/// Read session settings from the process environment for this build.
///
/// # Errors
/// Returns [`std::io::Error`] wrapping the session configuration fault.
pub fn session_settings_from_process_env() -> std::io::Result<SessionSettings> {
    session_settings_from_env(
        &mockable::DefaultEnv::new(),
        BuildMode::from_debug_assertions(),
    )
    .map_err(std::io::Error::other)
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: String,
    pub(crate) cors_origin: String,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from session and listener settings.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        bind_addr: impl Into<String>,
        cors_origin: impl Into<String>,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site: SameSite::Lax,
            bind_addr: bind_addr.into(),
            cors_origin: cors_origin.into(),
            db_pool: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// Without one the server stores events in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
