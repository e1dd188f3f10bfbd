use stayhub_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<GatewayError> for CoreError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Api { status, message } => CoreError::remote(Some(status), message),
            // Transport failures carry no message fit for the partner.
            GatewayError::Http(err) => CoreError::remote(err.status().map(|s| s.as_u16()), ""),
            GatewayError::Decode(message) => CoreError::Serde(message),
            GatewayError::Json(err) => CoreError::Serde(err.to_string()),
        }
    }
}
