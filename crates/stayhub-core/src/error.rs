use thiserror::Error;

use crate::location::GeolocationError;

/// Fallback shown when a failure carries no message worth surfacing.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Remote request failed (status {status:?}): {message}")]
    Remote {
        status: Option<u16>,
        message: String,
    },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

impl CoreError {
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        CoreError::Remote {
            status,
            message: message.into(),
        }
    }

    /// Text suitable for an inline error banner.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Remote { message, .. } if !message.trim().is_empty() => {
                message.trim().to_string()
            }
            CoreError::Geolocation(err) => err.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
