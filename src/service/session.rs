//! One connected device, from the capabilities request to end-of-stream.

use futures::SinkExt;
use std::fmt;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio_util::codec::FramedWrite;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::config::ServerConfig;
use crate::core::codec::LiveViewCodec;
use crate::error::TransportError;
use crate::protocol::dispatcher::Dispatcher;
use crate::protocol::message::Message;
use crate::utils::metrics::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Stream accepted, capabilities request not yet sent
    Connected,
    /// Reading and answering frames
    AwaitingFrames,
    Closed,
}

/// Why a session ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// The peer closed the stream.
    PeerDisconnected,
    /// A read or write failed.
    Failed(TransportError),
}

impl SessionEnd {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SessionEnd::Failed(e) if e.is_timeout())
    }
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEnd::PeerDisconnected => f.write_str("peer disconnected"),
            SessionEnd::Failed(e) => write!(f, "{e}"),
        }
    }
}

/// Drives the protocol over one duplex stream.
///
/// Inbound bytes are decoded one read at a time. Every frame in a read is
/// answered in order, and each reply is flushed before the next is written.
pub struct Session<'a, S> {
    reader: ReadHalf<S>,
    writer: FramedWrite<WriteHalf<S>, LiveViewCodec>,
    codec: LiveViewCodec,
    dispatcher: &'a Dispatcher,
    metrics: &'a Metrics,
    read_buffer_size: usize,
    read_timeout: Option<Duration>,
    state: SessionState,
}

impl<'a, S> Session<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(
        stream: S,
        dispatcher: &'a Dispatcher,
        server: &ServerConfig,
        metrics: &'a Metrics,
    ) -> Self {
        let codec = LiveViewCodec::new(dispatcher.config().byte_order);
        let (reader, writer) = tokio::io::split(stream);

        Self {
            reader,
            writer: FramedWrite::new(writer, codec),
            codec,
            dispatcher,
            metrics,
            read_buffer_size: server.read_buffer_size.max(1),
            read_timeout: server.read_timeout(),
            state: SessionState::Connected,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run until the peer disconnects or the stream fails.
    ///
    /// The stream is shut down on every exit path.
    #[instrument(skip_all, fields(peer = %peer))]
    pub async fn run(mut self, peer: &str) -> SessionEnd {
        self.metrics.session_started();
        info!("Session started");

        let end = match self.drive().await {
            Ok(()) => SessionEnd::PeerDisconnected,
            Err(e) => SessionEnd::Failed(e),
        };
        self.state = SessionState::Closed;

        match &end {
            SessionEnd::PeerDisconnected => info!("Peer disconnected"),
            SessionEnd::Failed(TransportError::Timeout) => {
                self.metrics.timeout();
                debug!("Session timed out");
            }
            SessionEnd::Failed(e) => {
                self.metrics.transport_error();
                error!(error = %e, "Session failed");
            }
        }

        if let Err(e) = self.writer.get_mut().shutdown().await {
            trace!(error = %e, "Stream shutdown failed");
        }
        self.metrics.session_closed();

        end
    }

    async fn drive(&mut self) -> Result<(), TransportError> {
        self.send(Message::CapsRequest).await?;
        self.state = SessionState::AwaitingFrames;

        let mut chunk = vec![0u8; self.read_buffer_size];
        loop {
            let n = self.read_chunk(&mut chunk).await?;
            if n == 0 {
                return Ok(());
            }
            self.metrics.bytes_read(n as u64);
            self.handle_chunk(&chunk[..n]).await?;
        }
    }

    async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        let read = self.reader.read(buf);
        match self.read_timeout {
            Some(limit) => match tokio::time::timeout(limit, read).await {
                Ok(result) => result.map_err(TransportError::from_io),
                Err(_) => Err(TransportError::Timeout),
            },
            None => read.await.map_err(TransportError::from_io),
        }
    }

    async fn handle_chunk(&mut self, chunk: &[u8]) -> Result<(), TransportError> {
        let decoded = self.codec.decode_chunk(chunk);

        for msg in &decoded.messages {
            self.metrics.frame_received();
            debug!(message_type = %msg.message_type(), "Frame received");

            for reply in self.dispatcher.respond(msg) {
                self.send(reply).await?;
            }
        }

        if let Some(e) = decoded.error {
            self.metrics.decode_error();
            warn!(error = %e, discarded = decoded.discarded, "Dropping undecodable input");
        }
        Ok(())
    }

    async fn send(&mut self, msg: Message) -> Result<(), TransportError> {
        let message_type = msg.message_type();
        let size = msg.encoded_len();

        self.writer
            .send(msg)
            .await
            .map_err(TransportError::from_io)?;

        self.metrics.frame_sent(size as u64);
        trace!(message_type = %message_type, size, "Frame sent");
        Ok(())
    }
}
