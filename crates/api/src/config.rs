use std::fmt::Display;
use std::str::FromStr;

use axum::http::HeaderValue;
use cybermind_db::{DbConfig, DEFAULT_DATABASE_NAME};

use crate::auth::jwt::JwtConfig;

/// Startup configuration problem. The server refuses to start.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be set")]
    Missing { var: &'static str },

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Where contact records live.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// PostgreSQL, connected lazily on first use.
    Postgres(DbConfig),
    /// Process memory. Records vanish on restart.
    Memory,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub store: StoreBackend,
    /// Identity-provider token settings. `None` leaves the API open.
    pub auth: Option<JwtConfig>,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default                  |
    /// |----------------------------|--------------------------|
    /// | `HOST`                     | `0.0.0.0`                |
    /// | `PORT`                     | `3000`                   |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                     |
    /// | `STORE_BACKEND`            | `postgres`               |
    /// | `DATABASE_URL`             | required for `postgres`  |
    /// | `DATABASE_NAME`            | `contact_app`            |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`                     |
    /// | `DATABASE_TIMEOUT_SECS`    | `5`                      |
    ///
    /// Token settings are documented on [`JwtConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_var(&lookup, "PORT", 3000)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                reason: format!("'{origin}': {e}"),
            })?;
        }

        let request_timeout_secs: u64 = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        let store = match lookup("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => {
                let url = lookup("DATABASE_URL")
                    .filter(|v| !v.trim().is_empty())
                    .ok_or(ConfigError::Missing {
                        var: "DATABASE_URL",
                    })?;
                StoreBackend::Postgres(DbConfig {
                    url,
                    database_name: lookup("DATABASE_NAME")
                        .unwrap_or_else(|| DEFAULT_DATABASE_NAME.into()),
                    max_connections: parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
                    acquire_timeout_secs: parse_var(&lookup, "DATABASE_TIMEOUT_SECS", 5)?,
                })
            }
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "STORE_BACKEND",
                    reason: format!("'{other}' (expected 'postgres' or 'memory')"),
                })
            }
        };

        let auth = JwtConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
            auth,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
pub(crate) fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}
