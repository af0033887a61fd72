use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid schema directory: {path}")]
    InvalidSchemaDirectory { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("Relay error: {0}")]
    Relay(#[from] huddle_relay::RelayError),

    #[error("Negotiator error: {0}")]
    Negotiator(#[from] huddle_negotiator::NegotiatorError),
}

impl CliError {
    pub fn invalid_directory(path: PathBuf) -> Self {
        CliError::InvalidSchemaDirectory { path }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
