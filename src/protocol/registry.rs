//! Type id → payload decoder mapping.
//!
//! The first byte of a frame selects the [`MessageType`]; the rest is handed
//! to that variant's payload decoder. Frames have no outer length, so the
//! decoder is also what decides how many bytes a frame occupies.

use crate::core::wire::{ByteOrder, WireReader};
use crate::error::DecodeError;
use crate::protocol::message::{Capabilities, MenuItem, Message, MessageType};

impl MessageType {
    /// Decode this variant's payload from a cursor positioned just after the type id.
    pub fn decode_payload(self, r: &mut WireReader<'_>) -> Result<Message, DecodeError> {
        let msg = match self {
            MessageType::CapsRequest => Message::CapsRequest,
            MessageType::CapsResponse => Message::CapsResponse(Capabilities {
                width: r.read_u8()?,
                height: r.read_u8()?,
                statusbar_width: r.read_u8()?,
                statusbar_height: r.read_u8()?,
                view_width: r.read_u8()?,
                view_height: r.read_u8()?,
                announce_width: r.read_u8()?,
                announce_height: r.read_u8()?,
                text_chunk_size: r.read_u8()?,
                idle_timer: r.read_u8()?,
                software_version: r.read_text()?,
            }),
            MessageType::DeviceStatus => Message::DeviceStatus {
                status: r.read_u8()?.into(),
            },
            MessageType::DeviceStatusAck => Message::DeviceStatusAck,
            MessageType::SetMenuSize => Message::SetMenuSize {
                menu_size: r.read_u8()?,
            },
            MessageType::SetMenuSizeAck => Message::SetMenuSizeAck {
                result: r.read_u8()?.into(),
            },
            MessageType::MenuItem => Message::MenuItem(MenuItem {
                index: r.read_u8()?,
                attention: r.read_bool()?,
                attribute: r.read_u16()?,
                label: r.read_text()?,
                icon: r.read_blob()?,
            }),
            MessageType::Navigation => Message::Navigation {
                action: r.read_u8()?.into(),
                nav_type: r.read_u8()?.into(),
            },
            MessageType::NavigationResponse => Message::NavigationResponse {
                result: r.read_u8()?.into(),
            },
            MessageType::GetMenuItems => Message::GetMenuItems,
            MessageType::GetTime => Message::GetTime,
            MessageType::GetTimeResponse => Message::GetTimeResponse {
                time: r.read_u32()?,
                use_24h: r.read_bool()?,
            },
            MessageType::SetVibrate => Message::SetVibrate {
                delay: r.read_u16()?,
                duration: r.read_u16()?,
            },
            MessageType::SetVibrateAck => Message::SetVibrateAck {
                result: r.read_u8()?.into(),
            },
            MessageType::Ack => Message::Ack {
                acked: r.read_u8()?,
            },
        };
        Ok(msg)
    }
}

/// Decode the first frame in `buf` and report how many bytes it used.
pub fn decode_frame_with(buf: &[u8], order: ByteOrder) -> Result<(Message, usize), DecodeError> {
    let (&type_id, payload) = buf.split_first().ok_or(DecodeError::Empty)?;
    let ty = MessageType::from_u8(type_id).ok_or(DecodeError::UnknownMessageType(type_id))?;

    let mut reader = WireReader::new(payload, type_id, order);
    let msg = ty.decode_payload(&mut reader)?;
    Ok((msg, 1 + reader.position()))
}

/// [`decode_frame_with`] using the default byte order.
pub fn decode_frame(buf: &[u8]) -> Result<(Message, usize), DecodeError> {
    decode_frame_with(buf, ByteOrder::default())
}

/// Decode one message from a received buffer; bytes after the first frame are ignored.
pub fn decode(buf: &[u8]) -> Result<Message, DecodeError> {
    decode_frame(buf).map(|(msg, _)| msg)
}
