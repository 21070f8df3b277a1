//! # Error Types
//!
//! Error handling for the LiveView host protocol.
//!
//! Errors are split by how far they are allowed to travel:
//!
//! ## Error Categories
//! - **Decode errors**: a single inbound frame could not be decoded. The frame is
//!   discarded and the session keeps reading.
//! - **Transport errors**: the stream failed or timed out. The session ends and the
//!   service goes back to accepting.
//! - **Setup errors**: the service cannot start (missing icon asset, bind failure).
//!
//! [`ProtocolError`] wraps all of them for APIs that can fail in more than one way.
//!
//! ## Example Usage
//! ```rust
//! use openliveview::error::{DecodeError, ProtocolError};
//! use openliveview::protocol::registry;
//! use tracing::warn;
//!
//! match registry::decode(&[0xFF]) {
//!     Err(DecodeError::UnknownMessageType(id)) => warn!(type_id = id, "Unknown frame"),
//!     Err(e) => warn!(error = %e, "Bad frame"),
//!     Ok(msg) => println!("{msg:?}"),
//! }
//!
//! let err: ProtocolError = DecodeError::Empty.into();
//! assert!(matches!(err, ProtocolError::Decode(DecodeError::Empty)));
//! ```

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Configuration errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";
    pub const ERR_CONFIG_INVALID: &str = "Configuration validation failed";

    /// Logging setup errors
    pub const ERR_LOGGING_INIT: &str = "Failed to initialize logging";
    pub const ERR_LOG_FILE: &str = "Failed to open log file";

    /// Transport errors
    pub const ERR_TIMED_OUT: &str = "timed out";
}

/// A single inbound frame could not be turned into a [`Message`](crate::protocol::message::Message).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Empty frame: no message type byte")]
    Empty,

    #[error("Unknown message type: {0}")]
    UnknownMessageType(u8),

    #[error("Truncated frame for message type {type_id}: needed {needed} more bytes, {remaining} left")]
    Truncated {
        type_id: u8,
        needed: usize,
        remaining: usize,
    },
}

/// Failure of the underlying duplex byte stream.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The transport timed out. Expected on idle serial links, not reported as an error.
    #[error("Transport timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Other(#[source] io::Error),
}

impl TransportError {
    /// Classify an I/O error into timeout or other.
    ///
    /// Bluetooth serial sockets surface timeouts as generic I/O errors whose text
    /// contains "timed out", so the message is checked as well as the kind.
    pub fn from_io(err: io::Error) -> Self {
        let timed_out = matches!(
            err.kind(),
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
        ) || err
            .to_string()
            .to_ascii_lowercase()
            .contains(constants::ERR_TIMED_OUT);

        if timed_out {
            TransportError::Timeout
        } else {
            TransportError::Other(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout)
    }
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        Self::from_io(err)
    }
}

/// Fatal errors while preparing the service.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Menu icon unavailable at {path}: {source}")]
    AssetUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Menu icon at {path} is {size} bytes (maximum: {max})")]
    AssetTooLarge {
        path: PathBuf,
        size: usize,
        max: usize,
    },

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },
}

// ProtocolError is the primary error type for all fallible operations in the crate
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_kind_is_classified() {
        let err = io::Error::new(io::ErrorKind::TimedOut, "read");
        assert!(TransportError::from_io(err).is_timeout());
    }

    #[test]
    fn test_timeout_text_is_classified() {
        let err = io::Error::new(io::ErrorKind::Other, "Connection timed out");
        assert!(TransportError::from_io(err).is_timeout());
    }

    #[test]
    fn test_reset_is_other() {
        let err = io::Error::new(io::ErrorKind::ConnectionReset, "Connection reset by peer");
        assert!(matches!(
            TransportError::from_io(err),
            TransportError::Other(_)
        ));
    }

    #[test]
    fn test_truncated_display() {
        let err = DecodeError::Truncated {
            type_id: 29,
            needed: 2,
            remaining: 1,
        };
        assert_eq!(
            err.to_string(),
            "Truncated frame for message type 29: needed 2 more bytes, 1 left"
        );
    }
}
