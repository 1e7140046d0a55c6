//! Error types
//!
//! The closed set of failures an FTP client operation can report. Every
//! error is raised synchronously from the operation that detected it;
//! nothing is swallowed or retried internally.

use std::fmt;
use std::io;

/// FTP client errors.
#[derive(Debug)]
pub enum FtpClientError {
    /// Control-channel connect, send, or receive exceeded the channel
    /// timeout. The session is reset before this propagates.
    Timeout(String),
    /// Name resolution failed for the given host.
    UnknownHost(String),
    /// The peer actively refused the connection.
    ConnectionRefused(String),
    /// An operation requiring a connection ran with no active host.
    NotConnected,
    /// An operation requiring a login ran with no authenticated user.
    NotAuthenticated,
    /// A local file could not be opened, read, or written during a
    /// transfer. Carries the underlying OS error text.
    LocalIo(String),
    /// Socket failure outside the kinds above.
    Io(io::Error),
}

impl fmt::Display for FtpClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpClientError::Timeout(host) => write!(f, "Connection to {} timed out", host),
            FtpClientError::UnknownHost(host) => write!(f, "Unknown host: {}", host),
            FtpClientError::ConnectionRefused(host) => {
                write!(f, "Connection refused by {}", host)
            }
            FtpClientError::NotConnected => write!(f, "Not connected to any host"),
            FtpClientError::NotAuthenticated => write!(f, "Not logged in"),
            FtpClientError::LocalIo(detail) => write!(f, "Local file error: {}", detail),
            FtpClientError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FtpClientError {}

impl From<io::Error> for FtpClientError {
    fn from(error: io::Error) -> Self {
        FtpClientError::Io(error)
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FtpClientError>;
