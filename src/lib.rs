//! # OpenLiveView
//!
//! Host side of the LiveView accessory protocol: the phone end that a
//! wearable display connects to over a serial stream.
//!
//! ## Layout
//! - [`core`]: wire primitives and the frame codec
//! - [`protocol`]: message model, decoding registry and response policy
//! - [`service`]: the accept loop and per-connection session
//! - [`transport`]: TCP and Unix socket listeners
//! - [`config`], [`error`], [`utils`]: configuration, error types, logging,
//!   metrics, clock and assets
//!
//! ## Example
//! ```no_run
//! use openliveview::config::LiveViewConfig;
//! use openliveview::protocol::Dispatcher;
//! use openliveview::service::LiveViewService;
//! use openliveview::transport::TcpAcceptor;
//!
//! # async fn demo() -> openliveview::error::Result<()> {
//! let config = LiveViewConfig::default();
//! let icon = openliveview::utils::assets::load_menu_icon(&config.assets.menu_icon_path)?;
//! let acceptor = TcpAcceptor::bind(config.server.address.as_str()).await?;
//! let dispatcher = Dispatcher::new(config.protocol.clone(), icon);
//!
//! let (service, handle) = LiveViewService::new(acceptor, dispatcher, config.server.clone());
//! tokio::spawn(async move {
//!     let _ = tokio::signal::ctrl_c().await;
//!     handle.stop();
//! });
//! service.run().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod service;
pub mod transport;
pub mod utils;

pub use config::LiveViewConfig;
pub use error::{DecodeError, ProtocolError, Result, SetupError, TransportError};
pub use protocol::{Dispatcher, Message, MessageType};
pub use service::{LiveViewService, ServiceHandle};
