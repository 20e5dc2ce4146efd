//! Error types for the backend client

use puris_forms::GatewayError;
use std::path::PathBuf;

/// Failure talking to the backend or preparing to
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to read settings from {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("API key is not a valid header value")]
    InvalidApiKey,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response with the server's message
    #[error("backend responded {status}: {message}")]
    Status { status: u16, message: String },
}

impl ClientError {
    /// HTTP status, if the backend answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<ClientError> for GatewayError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status, message } => GatewayError::from_status(status, message),
            ClientError::Http(e) if e.is_decode() => GatewayError::Decode(e.to_string()),
            other => GatewayError::Transport(other.to_string()),
        }
    }
}
