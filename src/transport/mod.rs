//! # Transport Layer
//!
//! Listeners that hand out duplex byte streams to the service.
//!
//! ## Available Transports
//! - **TCP**: `TcpAcceptor`, used for development and bridged serial links
//! - **Unix**: `UnixAcceptor`, for a local RFCOMM bridge (unix only)
//!
//! Any type implementing [`Acceptor`] can drive the service, which is how the
//! tests feed in-memory streams.

use std::future::Future;
use std::io;
use tokio::io::{AsyncRead, AsyncWrite};

#[cfg(unix)]
pub mod local;
pub mod tcp;

#[cfg(unix)]
pub use local::UnixAcceptor;
pub use tcp::TcpAcceptor;

/// A bound listener that yields one connected stream at a time.
///
/// Dropping the acceptor closes the listener.
pub trait Acceptor: Send {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    /// Wait for the next connection. Returns the stream and a printable peer
    /// description.
    fn accept(&mut self) -> impl Future<Output = io::Result<(Self::Stream, String)>> + Send;

    /// Printable description of the listening endpoint.
    fn local_addr(&self) -> String;
}
