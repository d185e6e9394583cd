use thiserror::Error;

/// Top-level error type for Cinegraph.
#[derive(Error, Debug)]
pub enum CinegraphError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },
}
