//! # Host Service
//!
//! The accept loop and the per-connection protocol session.
//!
//! Sessions never overlap: the loop accepts one device, runs its session to
//! completion, then accepts again.

pub mod server;
pub mod session;

pub use server::{LiveViewService, ServiceHandle};
pub use session::{Session, SessionEnd, SessionState};
