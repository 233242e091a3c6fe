use thiserror::Error;

use crate::config::database::ConnectionError;
use crate::config::env::ConfigError;
use crate::modules::person::crud::QueryError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl AppError {
    /// Process exit code for this failure.
    ///
    /// | code | meaning |
    /// |------|---------|
    /// | 2 | required configuration missing |
    /// | 3 | malformed connection URI |
    /// | 4 | cluster unreachable or authentication failed |
    /// | 5 | connect deadline elapsed |
    /// | 6 | query failed |
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(ConfigError::MissingKey(_)) => 2,
            AppError::Connection(ConnectionError::InvalidUri { .. }) => 3,
            AppError::Connection(ConnectionError::Unreachable { .. }) => 4,
            AppError::Connection(ConnectionError::Timeout { .. }) => 5,
            AppError::Query(_) => 6,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Config(ConfigError::MissingKey(_)) => "ConfigError::MissingKey",
            AppError::Connection(ConnectionError::InvalidUri { .. }) => "ConnectionError::InvalidUri",
            AppError::Connection(ConnectionError::Unreachable { .. }) => "ConnectionError::Unreachable",
            AppError::Connection(ConnectionError::Timeout { .. }) => "ConnectionError::Timeout",
            AppError::Query(QueryError::NotConnected) => "QueryError::NotConnected",
            AppError::Query(QueryError::Transport(_)) => "QueryError::Transport",
            AppError::Query(QueryError::Timeout(_)) => "QueryError::Timeout",
        }
    }
}
