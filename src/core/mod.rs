//! # Core Wire Components
//!
//! Low-level frame handling for the LiveView protocol.
//!
//! ## Components
//! - **Wire**: bounds-checked field reader, field writer, byte order, text encoding
//! - **Codec**: Tokio codec turning byte buffers into [`Message`](crate::protocol::message::Message)s and back
//!
//! ## Wire Format
//! ```text
//! [type_id(1)] [payload(N)]
//! ```
//! There is no outer length or checksum. Each payload is self-describing:
//! scalars have fixed widths, text and blobs carry a u16 length prefix.

pub mod codec;
pub mod wire;
