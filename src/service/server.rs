//! Accept loop: one session at a time until stopped.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

use crate::config::ServerConfig;
use crate::error::TransportError;
use crate::protocol::dispatcher::Dispatcher;
use crate::service::session::Session;
use crate::transport::Acceptor;
use crate::utils::metrics::Metrics;

/// Cloneable handle used to stop a running service and read its metrics.
#[derive(Debug, Clone)]
pub struct ServiceHandle {
    stop_tx: Arc<watch::Sender<bool>>,
    metrics: Arc<Metrics>,
}

impl ServiceHandle {
    /// Request a stop.
    ///
    /// A pending accept is abandoned and the listener closed. A session in
    /// progress runs to completion first.
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.stop_tx.borrow()
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }
}

/// The LiveView host: accepts a device, runs its session, and repeats.
pub struct LiveViewService<A> {
    acceptor: A,
    dispatcher: Dispatcher,
    server: ServerConfig,
    metrics: Arc<Metrics>,
    stop_rx: watch::Receiver<bool>,
}

impl<A: Acceptor> LiveViewService<A> {
    pub fn new(acceptor: A, dispatcher: Dispatcher, server: ServerConfig) -> (Self, ServiceHandle) {
        let (stop_tx, stop_rx) = watch::channel(false);
        let metrics = Arc::new(Metrics::new());

        let handle = ServiceHandle {
            stop_tx: Arc::new(stop_tx),
            metrics: Arc::clone(&metrics),
        };
        let service = Self {
            acceptor,
            dispatcher,
            server,
            metrics,
            stop_rx,
        };

        (service, handle)
    }

    /// Serve connections until [`ServiceHandle::stop`] is called.
    ///
    /// Per-frame and per-session failures are logged and never end the loop.
    /// A stop closes the listener right away; a session in progress keeps its
    /// stream and runs to completion before this returns.
    #[instrument(skip_all, fields(address = %self.acceptor.local_addr()))]
    pub async fn run(self) {
        let Self {
            acceptor,
            dispatcher,
            server,
            metrics,
            mut stop_rx,
        } = self;
        let mut acceptor = Some(acceptor);

        info!("Service started");

        loop {
            if *stop_rx.borrow() {
                break;
            }
            let Some(listener) = acceptor.as_mut() else {
                break;
            };

            let accepted = tokio::select! {
                biased;
                _ = stopped(&mut stop_rx) => break,
                accepted = listener.accept() => accepted,
            };

            match accepted {
                Ok((stream, peer)) => {
                    let session = Session::new(stream, &dispatcher, &server, &metrics).run(&peer);
                    tokio::pin!(session);

                    let end = tokio::select! {
                        end = &mut session => end,
                        _ = stopped(&mut stop_rx) => {
                            acceptor = None;
                            info!(peer = %peer, "Listener closed, waiting for active session");
                            session.await
                        }
                    };
                    debug!(peer = %peer, reason = %end, "Session closed");
                    metrics.log_metrics();
                }
                Err(e) => {
                    match TransportError::from_io(e) {
                        TransportError::Timeout => debug!("Accept timed out"),
                        TransportError::Other(e) => {
                            metrics.transport_error();
                            error!(error = %e, "Error accepting connection");
                        }
                    }

                    tokio::select! {
                        biased;
                        _ = stopped(&mut stop_rx) => break,
                        _ = tokio::time::sleep(server.accept_retry_delay) => {}
                    }
                }
            }
        }

        drop(acceptor);
        info!("Service stopped");
    }
}

/// Resolves once a stop has been requested. Never resolves if every handle is
/// gone without stopping.
async fn stopped(stop_rx: &mut watch::Receiver<bool>) {
    let requested = stop_rx.wait_for(|stop| *stop).await.is_ok();
    if !requested {
        std::future::pending::<()>().await;
    }
}
