use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from file: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    #[error("Failed to write configuration file: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Failed to initialise logging: {0}")]
    LoggingError(String),
}
