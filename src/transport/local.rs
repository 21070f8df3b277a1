use std::io;
use std::path::{Path, PathBuf};
use tokio::net::{UnixListener, UnixStream};
use tracing::{error, info, instrument};

use crate::error::SetupError;
use crate::transport::Acceptor;

/// Unix domain socket listener.
///
/// A stale socket file left by an earlier run is removed before binding, and
/// the file is removed again when the acceptor is dropped.
#[derive(Debug)]
pub struct UnixAcceptor {
    listener: UnixListener,
    path: PathBuf,
}

impl UnixAcceptor {
    /// Must be called from within a tokio runtime.
    #[instrument(skip(path), fields(socket_path = %path.as_ref().display()))]
    pub fn bind<P: AsRef<Path>>(path: P) -> Result<Self, SetupError> {
        let path = path.as_ref().to_path_buf();
        let bind_error = |source| SetupError::Bind {
            address: path.display().to_string(),
            source,
        };

        if path.exists() {
            std::fs::remove_file(&path).map_err(bind_error)?;
        }

        let listener = UnixListener::bind(&path).map_err(bind_error)?;
        info!(path = %path.display(), "Listening on unix socket");

        Ok(Self { listener, path })
    }
}

impl Acceptor for UnixAcceptor {
    type Stream = UnixStream;

    async fn accept(&mut self) -> io::Result<(UnixStream, String)> {
        let (stream, peer) = self.listener.accept().await?;
        let peer = peer
            .as_pathname()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| format!("unix:{}", self.path.display()));
        Ok((stream, peer))
    }

    fn local_addr(&self) -> String {
        self.path.display().to_string()
    }
}

impl Drop for UnixAcceptor {
    fn drop(&mut self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                error!(error = %e, path = %self.path.display(), "Failed to remove socket file");
            } else {
                info!(path = %self.path.display(), "Removed socket file");
            }
        }
    }
}
