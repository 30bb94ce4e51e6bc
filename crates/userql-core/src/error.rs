use thiserror::Error;

/// Top-level error type for userql components outside the request path.
#[derive(Error, Debug)]
pub enum UserqlError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, UserqlError>;
