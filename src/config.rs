//! Server configuration loaded from environment variables.

use crate::error::ConfigError;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// In-memory tables; nothing survives a restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("unknown backend {} (expected postgres or memory)", s)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub backend: StoreBackend,
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                          |
    /// |----------------------------|----------------------------------|
    /// | `HOST`                     | `0.0.0.0`                        |
    /// | `PORT`                     | `3000`                           |
    /// | `DATABASE_URL`             | `postgres://localhost/star_wars` |
    /// | `DATABASE_MAX_CONNECTIONS` | `5`                              |
    /// | `STORE_BACKEND`            | `postgres`                       |
    /// | `BODY_LIMIT_BYTES`         | `102400`                         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let string = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.to_string());
        Ok(ServerConfig {
            host: string("HOST", "0.0.0.0"),
            port: parsed(&lookup, "PORT", 3000)?,
            database_url: string("DATABASE_URL", "postgres://localhost/star_wars"),
            max_connections: parsed(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            backend: parsed(&lookup, "STORE_BACKEND", StoreBackend::Postgres)?,
            body_limit_bytes: parsed(&lookup, "BODY_LIMIT_BYTES", 100 * 1024)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}
