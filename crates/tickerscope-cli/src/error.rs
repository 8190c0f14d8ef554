use thiserror::Error;

use tickerscope_core::{ConfigError, InputError, QueryError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Input(_) => 2,
            Self::Config(_) => 2,
            Self::Query(QueryError::Input(_)) => 2,
            Self::Query(QueryError::Validation(_)) => 4,
            Self::Query(QueryError::Transport(_)) => 6,
            Self::Query(QueryError::QuotaExceeded { .. }) => 7,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
