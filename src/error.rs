/* src/error.rs */

use std::time::Duration;

use thiserror::Error;

/// Result type alias for operations that may fail with `MyIpError`.
pub type Result<T> = std::result::Result<T, MyIpError>;

/// Errors returned by the single-endpoint calls.
///
/// The dual-stack resolver never returns these; it records a failed branch
/// as an absent address instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MyIpError {
    /// The request did not complete within its timeout.
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// DNS failure, refused or reset connection, or any other transport failure.
    #[error("Connection to {url} failed: {reason}")]
    Connection {
        url: String,
        timeout: Duration,
        reason: String,
    },

    /// The server answered with a non-success status code.
    #[error("Request to {url} returned HTTP status {status}")]
    Status { url: String, status: u16 },

    /// The body could not be decoded into the expected shape.
    #[error("Failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// A request was attempted with a zero timeout.
    #[error("Timeout must be greater than zero, got {0:?}")]
    InvalidTimeout(Duration),
}

/// Coarse classification of a [`MyIpError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Timeout,
    Connection,
    Status,
    Decode,
    /// Client construction or call arguments were rejected before any I/O.
    Config,
}

impl MyIpError {
    /// The failure class, for callers deciding whether to retry.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MyIpError::Timeout { .. } => ErrorKind::Timeout,
            MyIpError::Connection { .. } => ErrorKind::Connection,
            MyIpError::Status { .. } => ErrorKind::Status,
            MyIpError::Decode { .. } => ErrorKind::Decode,
            MyIpError::ClientBuild(_) | MyIpError::InvalidTimeout(_) => ErrorKind::Config,
        }
    }

    /// The URL the failed request targeted, if a request was made.
    pub fn url(&self) -> Option<&str> {
        match self {
            MyIpError::Timeout { url, .. }
            | MyIpError::Connection { url, .. }
            | MyIpError::Status { url, .. }
            | MyIpError::Decode { url, .. } => Some(url),
            MyIpError::ClientBuild(_) | MyIpError::InvalidTimeout(_) => None,
        }
    }

    /// The HTTP status code for [`MyIpError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            MyIpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The timeout the failed request ran with.
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            MyIpError::Timeout { timeout, .. } | MyIpError::Connection { timeout, .. } => {
                Some(*timeout)
            }
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, MyIpError::Timeout { .. })
    }
}
