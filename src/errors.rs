use stayhub_config::ConfigError;
use stayhub_core::CoreError;
use stayhub_gateway::GatewayError;
use stayhub_media::MediaError;
use thiserror::Error;

/// Failures surfaced by the application layer and the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Usage(String),
}

impl AppError {
    /// Text shown to the partner when a command fails.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Core(err) => err.user_message(),
            AppError::Gateway(GatewayError::Api { message, .. }) if !message.is_empty() => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}
