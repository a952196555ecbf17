//! API error types for the Cinebot remote client.

use thiserror::Error;

/// Error type for every Cinebot remote operation.
///
/// Callers usually branch on [`ApiError::Logical`] (a business rule said no:
/// residue exhausted, lease expired, sector sold out) versus everything else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Invalid client configuration (malformed base URL, bad env value)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure before a response was received (DNS, refused, TLS, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response received but not a valid envelope, or the value has an unexpected shape
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Business-rule failure reported by the server
    #[error("Logical error: {0}")]
    Logical(String),

    /// Any other failure reported by the server
    #[error("Remote error: {0}")]
    Remote(String),
}

impl ApiError {
    /// The message carried by the error, without the kind prefix.
    ///
    /// For `Logical` and `Remote` this is the envelope's `error` text verbatim.
    pub fn message(&self) -> &str {
        match self {
            Self::Configuration(msg)
            | Self::Connection(msg)
            | Self::Protocol(msg)
            | Self::Logical(msg)
            | Self::Remote(msg) => msg,
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Self::Logical(_))
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Whether the server answered (as opposed to a local or transport failure).
    pub fn is_server_reported(&self) -> bool {
        matches!(self, Self::Logical(_) | Self::Remote(_))
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(feature = "http")]
impl From<reqwest::Error> for ApiError {
    /// The request URL is dropped from the message: GET URLs carry the passkey.
    fn from(err: reqwest::Error) -> Self {
        ApiError::Connection(err.without_url().to_string())
    }
}
