use std::env;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DB_URI: &str = "DB_URI";
pub const DB_NAME: &str = "DB_NAME";
pub const DB_COLLECTION: &str = "DB_COLLECTION";
pub const DB_CONNECT_TIMEOUT_SECS: &str = "DB_CONNECT_TIMEOUT_SECS";
pub const DB_QUERY_TIMEOUT_SECS: &str = "DB_QUERY_TIMEOUT_SECS";

const DEFAULT_DATABASE: &str = "myapp";
const DEFAULT_COLLECTION: &str = "people";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration key {0}")]
    MissingKey(&'static str),
}

/// Read-only view of the environment, taken once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
    db_uri: Option<String>,
    pub database: String,
    pub collection: String,
    pub connect_timeout: Duration,
    pub query_timeout: Duration,
}

/// Merges `.env` from the working directory (if any) into the process
/// environment and snapshots it. Variables already set are left alone.
pub fn load() -> ConfigSnapshot {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }
    ConfigSnapshot::from_process_env()
}

/// Same as [`load`] but reads an explicit environment file.
pub fn load_from(path: impl AsRef<Path>) -> ConfigSnapshot {
    let path = path.as_ref();
    match dotenvy::from_path(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => {
            tracing::debug!(path = %path.display(), "Environment file not found")
        }
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable environment file"),
    }
    ConfigSnapshot::from_process_env()
}

impl ConfigSnapshot {
    pub fn from_process_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            db_uri: non_empty(DB_URI),
            database: non_empty(DB_NAME).unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            collection: non_empty(DB_COLLECTION).unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            connect_timeout: timeout_secs(DB_CONNECT_TIMEOUT_SECS, non_empty(DB_CONNECT_TIMEOUT_SECS)),
            query_timeout: timeout_secs(DB_QUERY_TIMEOUT_SECS, non_empty(DB_QUERY_TIMEOUT_SECS)),
        }
    }

    pub fn db_uri(&self) -> Result<&str, ConfigError> {
        self.db_uri.as_deref().ok_or(ConfigError::MissingKey(DB_URI))
    }

    pub fn has_db_uri(&self) -> bool {
        self.db_uri.is_some()
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

fn timeout_secs(key: &str, raw: Option<String>) -> Duration {
    let Some(raw) = raw else {
        return Duration::from_secs(DEFAULT_TIMEOUT_SECS);
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        _ => {
            tracing::warn!(key, value = %raw, default = DEFAULT_TIMEOUT_SECS, "Invalid timeout, using default");
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        }
    }
}
