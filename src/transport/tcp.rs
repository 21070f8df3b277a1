use std::io;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tracing::{info, instrument, warn};

use crate::error::SetupError;
use crate::transport::Acceptor;

/// TCP listener for the host service
#[derive(Debug)]
pub struct TcpAcceptor {
    listener: TcpListener,
    local: String,
}

impl TcpAcceptor {
    #[instrument(skip(addr))]
    pub async fn bind<A: ToSocketAddrs + ToString>(addr: A) -> Result<Self, SetupError> {
        let address = addr.to_string();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| SetupError::Bind {
                address: address.clone(),
                source,
            })?;

        let local = listener
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or(address);
        info!(address = %local, "Listening on TCP");

        Ok(Self { listener, local })
    }
}

impl Acceptor for TcpAcceptor {
    type Stream = TcpStream;

    async fn accept(&mut self) -> io::Result<(TcpStream, String)> {
        let (stream, peer) = self.listener.accept().await?;
        // Frames are small and strictly request/response
        if let Err(e) = stream.set_nodelay(true) {
            warn!(error = %e, peer = %peer, "Failed to set TCP_NODELAY");
        }
        Ok((stream, peer.to_string()))
    }

    fn local_addr(&self) -> String {
        self.local.clone()
    }
}
