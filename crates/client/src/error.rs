//! Error types for the search client

use std::fmt;

/// Errors raised while setting up or sending a search request
#[derive(Debug)]
pub enum ClientError {
    /// The HTTP client could not be built from configuration
    ConfigError(String),

    /// The request never produced a response
    RequestError { kind: &'static str, message: String },
}

impl ClientError {
    /// Classify a reqwest failure that happened before a response arrived
    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            "timeout"
        } else if err.is_connect() {
            "connection"
        } else if err.is_request() {
            "request build"
        } else if err.is_body() {
            "body"
        } else {
            "unknown"
        };
        Self::RequestError {
            kind,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            Self::RequestError { kind, message } => {
                write!(f, "Search request failed ({kind}): {message}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ClientError> for evalboard_core::error::Error {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::ConfigError(msg) => evalboard_core::error::Error::config(msg),
            ClientError::RequestError { kind, message } => {
                evalboard_core::error::Error::transport(kind, message)
            }
        }
    }
}
