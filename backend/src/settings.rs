//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `EVENTS_*` environment variables, or a
//! config file, with the usual OrthoConfig precedence.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings controlling the HTTP listener and the event store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EVENTS")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    #[ortho_config(default = String::from(DEFAULT_BIND_ADDR))]
    pub bind_addr: String,
    /// PostgreSQL connection string. Without one, events live in memory.
    pub database_url: Option<String>,
    /// Browser origin allowed by the CORS policy.
    #[ortho_config(default = String::from(DEFAULT_CORS_ORIGIN))]
    pub cors_origin: String,
    /// Upper bound for pooled database connections.
    #[ortho_config(default = DEFAULT_DB_MAX_CONNECTIONS)]
    pub db_max_connections: u32,
}

impl AppSettings {
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("events-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("EVENTS_BIND_ADDR", None::<String>),
            ("EVENTS_DATABASE_URL", None::<String>),
            ("EVENTS_CORS_ORIGIN", None::<String>),
            ("EVENTS_DB_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
        assert!(settings.database_url().is_none());
        assert_eq!(settings.cors_origin, DEFAULT_CORS_ORIGIN);
        assert_eq!(settings.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EVENTS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "EVENTS_DATABASE_URL",
                Some("postgres://events@localhost/events".to_owned()),
            ),
            ("EVENTS_CORS_ORIGIN", Some("https://events.example".to_owned())),
            ("EVENTS_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr, "127.0.0.1:9000");
        assert_eq!(
            settings.database_url(),
            Some("postgres://events@localhost/events")
        );
        assert_eq!(settings.cors_origin, "https://events.example");
        assert_eq!(settings.db_max_connections, 4);
    }
}
