use bytes::BytesMut;
use std::io;
use tokio_util::codec::Encoder;

use crate::core::wire::ByteOrder;
use crate::error::DecodeError;
use crate::protocol::message::Message;
use crate::protocol::registry::decode_frame_with;

/// Frame codec for LiveView messages.
///
/// Outbound frames go through the tokio-util [`Encoder`], so the codec can back
/// a `FramedWrite`. Inbound bytes are decoded one read at a time with
/// [`decode_chunk`](Self::decode_chunk). Frames carry no outer length, so a
/// frame cut off by the end of a read cannot be told apart from a malformed
/// one. The codec therefore does not implement `Decoder`, and nothing is
/// carried over between reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveViewCodec {
    order: ByteOrder,
}

/// Everything one read produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedChunk {
    /// Complete frames, in arrival order.
    pub messages: Vec<Message>,
    /// The frame that stopped decoding, if any.
    pub error: Option<DecodeError>,
    /// Bytes dropped from the failed frame to the end of the read.
    pub discarded: usize,
}

impl LiveViewCodec {
    pub fn new(order: ByteOrder) -> Self {
        Self { order }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Decode every frame in `chunk`, stopping at the first bad one.
    pub fn decode_chunk(&self, chunk: &[u8]) -> DecodedChunk {
        let mut decoded = DecodedChunk::default();
        let mut rest = chunk;

        while !rest.is_empty() {
            match decode_frame_with(rest, self.order) {
                Ok((msg, used)) => {
                    decoded.messages.push(msg);
                    rest = &rest[used..];
                }
                Err(e) => {
                    decoded.error = Some(e);
                    decoded.discarded = rest.len();
                    break;
                }
            }
        }

        decoded
    }
}

impl Encoder<Message> for LiveViewCodec {
    type Error = io::Error;

    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> io::Result<()> {
        item.encode(dst, self.order);
        Ok(())
    }
}
