//! Application settings loaded via OrthoConfig.
//!
//! Values layer from CLI flags, `TRAINING_TRACKER_*` environment variables
//! and an optional configuration file. [`AppSettings::resolve`] turns the raw
//! values into a [`ResolvedSettings`] that start-up can act on without
//! further checks.

use std::io;
use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_RUN_MIGRATIONS: bool = true;
const DEFAULT_SEED_DEMO_DATA: bool = true;
const DEFAULT_EXPOSE_ERROR_DETAILS: bool = false;

/// Which storage backend serves the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    InMemory,
    Postgres,
}

impl FromStr for PersistenceMode {
    type Err = io::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown persistence mode `{other}` (expected in_memory or postgres)"),
            )),
        }
    }
}

/// Raw configuration values as layered by OrthoConfig.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRAINING_TRACKER")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_address: Option<String>,
    /// `in_memory` or `postgres`.
    pub persistence_mode: Option<String>,
    /// PostgreSQL connection URL; required in postgres mode.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    pub run_migrations: Option<bool>,
    /// Load demo users and courses into the in-memory store.
    pub seed_demo_data: Option<bool>,
    /// Include the original message of internal errors in responses.
    pub expose_error_details: Option<bool>,
}

/// Storage selection with everything it needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    InMemory {
        seed_demo_data: bool,
    },
    Postgres {
        database_url: String,
        max_connections: u32,
        run_migrations: bool,
    },
}

/// Validated settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub bind_addr: SocketAddr,
    pub persistence: Persistence,
    pub expose_error_details: bool,
}

impl AppSettings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_address(&self) -> &str {
        self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    /// Return the configured pool size, falling back to the default.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Whether to apply migrations at start-up; defaults to `true`.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(DEFAULT_RUN_MIGRATIONS)
    }

    /// Whether to seed the in-memory store; defaults to `true`.
    pub fn seed_demo_data(&self) -> bool {
        self.seed_demo_data.unwrap_or(DEFAULT_SEED_DEMO_DATA)
    }

    /// Whether error responses carry internal details; defaults to `false`.
    pub fn expose_error_details(&self) -> bool {
        self.expose_error_details
            .unwrap_or(DEFAULT_EXPOSE_ERROR_DETAILS)
    }

    /// Parse the persistence mode; unset means in-memory.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] for an unknown mode.
    pub fn persistence_mode(&self) -> io::Result<PersistenceMode> {
        self.persistence_mode
            .as_deref()
            .map_or(Ok(PersistenceMode::InMemory), str::parse)
    }

    /// Validate the raw values.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when the bind address or mode
    /// does not parse, or postgres mode has no database URL.
    ///
    /// # Examples
    /// ```
    /// use training_tracker::settings::{AppSettings, Persistence};
    ///
    /// let settings = AppSettings {
    ///     bind_address: Some("127.0.0.1:9000".to_owned()),
    ///     persistence_mode: None,
    ///     database_url: None,
    ///     db_max_connections: None,
    ///     run_migrations: None,
    ///     seed_demo_data: Some(false),
    ///     expose_error_details: None,
    /// };
    /// let resolved = settings.resolve().expect("valid settings");
    /// assert_eq!(resolved.bind_addr.port(), 9000);
    /// assert_eq!(
    ///     resolved.persistence,
    ///     Persistence::InMemory { seed_demo_data: false }
    /// );
    /// ```
    pub fn resolve(&self) -> io::Result<ResolvedSettings> {
        let bind_addr = self.bind_address().parse::<SocketAddr>().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address `{}`: {err}", self.bind_address()),
            )
        })?;

        let persistence = match self.persistence_mode()? {
            PersistenceMode::InMemory => Persistence::InMemory {
                seed_demo_data: self.seed_demo_data(),
            },
            PersistenceMode::Postgres => {
                let database_url = self
                    .database_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::InvalidInput,
                            "postgres persistence requires TRAINING_TRACKER_DATABASE_URL",
                        )
                    })?;
                Persistence::Postgres {
                    database_url: database_url.to_owned(),
                    max_connections: self.db_max_connections(),
                    run_migrations: self.run_migrations(),
                }
            }
        };

        Ok(ResolvedSettings {
            bind_addr,
            persistence,
            expose_error_details: self.expose_error_details(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and validation.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "TRAINING_TRACKER_BIND_ADDRESS",
        "TRAINING_TRACKER_PERSISTENCE_MODE",
        "TRAINING_TRACKER_DATABASE_URL",
        "TRAINING_TRACKER_DB_MAX_CONNECTIONS",
        "TRAINING_TRACKER_RUN_MIGRATIONS",
        "TRAINING_TRACKER_SEED_DEMO_DATA",
        "TRAINING_TRACKER_EXPOSE_ERROR_DETAILS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("training-tracker")])
            .expect("config should load")
    }

    fn with_env(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    fn raw(mode: Option<&str>, url: Option<&str>) -> AppSettings {
        AppSettings {
            bind_address: None,
            persistence_mode: mode.map(str::to_owned),
            database_url: url.map(str::to_owned),
            db_max_connections: None,
            run_migrations: None,
            seed_demo_data: None,
            expose_error_details: None,
        }
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(with_env(&[]));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_address(), DEFAULT_BIND_ADDRESS);
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
        assert!(settings.run_migrations());
        assert!(settings.seed_demo_data());
        assert!(!settings.expose_error_details());

        let resolved = settings.resolve().expect("defaults resolve");
        assert_eq!(resolved.bind_addr.port(), 8080);
        assert_eq!(
            resolved.persistence,
            Persistence::InMemory {
                seed_demo_data: true
            }
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(with_env(&[
            ("TRAINING_TRACKER_BIND_ADDRESS", "127.0.0.1:3000"),
            ("TRAINING_TRACKER_PERSISTENCE_MODE", "postgres"),
            (
                "TRAINING_TRACKER_DATABASE_URL",
                "postgres://app:secret@db/training",
            ),
            ("TRAINING_TRACKER_DB_MAX_CONNECTIONS", "4"),
            ("TRAINING_TRACKER_RUN_MIGRATIONS", "false"),
            ("TRAINING_TRACKER_EXPOSE_ERROR_DETAILS", "true"),
        ]));

        let resolved = load_from_empty_args().resolve().expect("overrides resolve");
        assert_eq!(resolved.bind_addr.to_string(), "127.0.0.1:3000");
        assert!(resolved.expose_error_details);
        assert_eq!(
            resolved.persistence,
            Persistence::Postgres {
                database_url: "postgres://app:secret@db/training".to_owned(),
                max_connections: 4,
                run_migrations: false,
            }
        );
    }

    #[rstest]
    #[case("true", "false", true, false)]
    #[case("false", "true", false, true)]
    fn boolean_flags_follow_the_environment(
        #[case] expose: &str,
        #[case] seed: &str,
        #[case] expected_expose: bool,
        #[case] expected_seed: bool,
    ) {
        let _guard = lock_env(with_env(&[
            ("TRAINING_TRACKER_EXPOSE_ERROR_DETAILS", expose),
            ("TRAINING_TRACKER_SEED_DEMO_DATA", seed),
        ]));

        let resolved = load_from_empty_args().resolve().expect("flags resolve");
        assert_eq!(resolved.expose_error_details, expected_expose);
        assert_eq!(
            resolved.persistence,
            Persistence::InMemory {
                seed_demo_data: expected_seed
            }
        );
    }

    #[rstest]
    #[case("in_memory", PersistenceMode::InMemory)]
    #[case("InMemory", PersistenceMode::InMemory)]
    #[case(" postgres ", PersistenceMode::Postgres)]
    #[case("PostgreSQL", PersistenceMode::Postgres)]
    fn persistence_modes_parse(#[case] raw_mode: &str, #[case] expected: PersistenceMode) {
        assert_eq!(raw_mode.parse::<PersistenceMode>().expect("mode"), expected);
    }

    #[rstest]
    #[case(raw(Some("sqlite"), None), "unknown persistence mode")]
    #[case(raw(Some("postgres"), None), "DATABASE_URL")]
    #[case(raw(Some("postgres"), Some("  ")), "DATABASE_URL")]
    fn invalid_combinations_fail(#[case] settings: AppSettings, #[case] fragment: &str) {
        let error = settings.resolve().expect_err("invalid settings");
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
        assert!(error.to_string().contains(fragment), "{error}");
    }

    #[rstest]
    fn unparsable_bind_address_fails() {
        let mut settings = raw(None, None);
        settings.bind_address = Some("not-an-address".to_owned());

        let error = settings.resolve().expect_err("invalid address");
        assert!(error.to_string().contains("not-an-address"));
    }
}
