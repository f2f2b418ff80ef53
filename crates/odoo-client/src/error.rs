//! Error types for the Odoo client.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a session.
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials were rejected, or the authentication payload carried no
    /// usable identity (`uid` missing or falsy).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A gated operation was invoked while the session is not connected.
    /// Raised before any network activity; a usage error the caller must
    /// prevent, never retried.
    #[error("not connected to the server")]
    NotConnected,

    /// Network-level failure: refused connection, DNS, TLS, broken body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request did not complete within its timeout.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// Structured fault returned by the server inside an otherwise
    /// successful transport response.
    #[error("server error: {message}")]
    Rpc {
        message: String,
        code: Option<i64>,
    },

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if this is an authentication failure.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    /// Returns true if this is the not-connected usage error.
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Error::NotConnected)
    }

    /// Returns true for timeouts.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }

    /// Returns the server-side fault message, when this is one.
    pub fn rpc_message(&self) -> Option<&str> {
        match self {
            Error::Rpc { message, .. } => Some(message),
            _ => None,
        }
    }
}
