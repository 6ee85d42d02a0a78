//! Error types for the NETIO client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using NetioError
pub type Result<T> = std::result::Result<T, NetioError>;

/// Unified error type for NETIO client operations.
///
/// Every I/O failure is classified by when it happened: `Connection` while
/// establishing the socket or reading the greeting, `Transport` once a
/// session is established (the underlying cause is kept as the source).
#[derive(Debug, Error)]
pub enum NetioError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    /// I/O failure on an established, authorized session. The original
    /// cause is preserved as the source.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
