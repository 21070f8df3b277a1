//! Field-level wire primitives.
//!
//! Every payload is a sequence of fixed-width scalars and length-prefixed
//! variable fields:
//!
//! ```text
//! u8      [b]
//! u16     [hi][lo]            (big-endian by default)
//! u32     [b3][b2][b1][b0]
//! text    [len:u16][len bytes, one byte per character]
//! blob    [len:u16][len bytes]
//! ```
//!
//! [`WireReader`] never reads past the end of its slice; a short read is a
//! [`DecodeError::Truncated`] carrying the frame's type id.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Longest text or blob a single u16 length prefix can describe.
pub const MAX_FIELD_LEN: usize = u16::MAX as usize;

/// Byte order used for multi-byte scalars and length prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}

impl std::str::FromStr for ByteOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "big" | "be" => Ok(ByteOrder::Big),
            "little" | "le" => Ok(ByteOrder::Little),
            other => Err(format!("Invalid byte order: {other}")),
        }
    }
}

/// Encode text as ISO-8859-1. Characters outside that range become `?`.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

/// Decode ISO-8859-1 bytes. Every byte maps to exactly one character.
pub fn decode_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Bounds-checked cursor over one frame's payload.
#[derive(Debug)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
    order: ByteOrder,
    type_id: u8,
}

impl<'a> WireReader<'a> {
    /// `type_id` is only used to label truncation errors.
    pub fn new(buf: &'a [u8], type_id: u8, order: ByteOrder) -> Self {
        Self {
            buf,
            pos: 0,
            order,
            type_id,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if remaining < n {
            return Err(DecodeError::Truncated {
                type_id: self.type_id,
                needed: n,
                remaining,
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    /// Any non-zero byte reads as `true`.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let mut field = self.take(2)?;
        Ok(match self.order {
            ByteOrder::Big => field.get_u16(),
            ByteOrder::Little => field.get_u16_le(),
        })
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let mut field = self.take(4)?;
        Ok(match self.order {
            ByteOrder::Big => field.get_u32(),
            ByteOrder::Little => field.get_u32_le(),
        })
    }

    pub fn read_blob(&mut self) -> Result<Bytes, DecodeError> {
        let len = self.read_u16()? as usize;
        Ok(Bytes::copy_from_slice(self.take(len)?))
    }

    pub fn read_text(&mut self) -> Result<String, DecodeError> {
        let len = self.read_u16()? as usize;
        Ok(decode_text(self.take(len)?))
    }
}

/// Appends payload fields to a frame buffer.
pub struct WireWriter<'a> {
    buf: &'a mut BytesMut,
    order: ByteOrder,
}

impl<'a> WireWriter<'a> {
    pub fn new(buf: &'a mut BytesMut, order: ByteOrder) -> Self {
        Self { buf, order }
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn put_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    pub fn put_u16(&mut self, value: u16) {
        match self.order {
            ByteOrder::Big => self.buf.put_u16(value),
            ByteOrder::Little => self.buf.put_u16_le(value),
        }
    }

    pub fn put_u32(&mut self, value: u32) {
        match self.order {
            ByteOrder::Big => self.buf.put_u32(value),
            ByteOrder::Little => self.buf.put_u32_le(value),
        }
    }

    /// Data longer than [`MAX_FIELD_LEN`] is cut so the prefix stays accurate.
    pub fn put_blob(&mut self, data: &[u8]) {
        let data = &data[..data.len().min(MAX_FIELD_LEN)];
        self.buf.reserve(2 + data.len());
        self.put_u16(data.len() as u16);
        self.buf.put_slice(data);
    }

    pub fn put_text(&mut self, text: &str) {
        self.put_blob(&encode_text(text));
    }
}
