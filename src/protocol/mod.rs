//! # LiveView Protocol
//!
//! Message model, frame decoding and the host's response policy.
//!
//! ## Components
//! - **Message**: closed set of frame variants and their wire layout
//! - **Registry**: type id lookup and payload decoding
//! - **Dispatcher**: acknowledgement and per-type responses

pub mod dispatcher;
pub mod message;
pub mod registry;

#[cfg(test)]
mod tests;

pub use dispatcher::Dispatcher;
pub use message::{
    Capabilities, DeviceStatusCode, MenuItem, Message, MessageType, NavAction, NavType, ResultCode,
};
