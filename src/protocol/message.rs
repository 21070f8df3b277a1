//! LiveView message types.
//!
//! Every frame starts with a one-byte type id that selects exactly one
//! [`Message`] variant; the payload layout is fixed per variant. See
//! [`registry`](crate::protocol::registry) for the decoding side.

use bytes::{Bytes, BytesMut};
use std::fmt;

use crate::core::wire::{ByteOrder, WireWriter, MAX_FIELD_LEN};

/// Numeric identifiers of every message the host knows about.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    CapsRequest = 1,
    CapsResponse = 2,
    DeviceStatus = 7,
    DeviceStatusAck = 8,
    SetMenuSize = 23,
    SetMenuSizeAck = 24,
    MenuItem = 26,
    Navigation = 29,
    NavigationResponse = 30,
    GetMenuItems = 35,
    GetTime = 38,
    GetTimeResponse = 39,
    SetVibrate = 42,
    SetVibrateAck = 43,
    Ack = 44,
}

impl MessageType {
    pub const ALL: [MessageType; 15] = [
        MessageType::CapsRequest,
        MessageType::CapsResponse,
        MessageType::DeviceStatus,
        MessageType::DeviceStatusAck,
        MessageType::SetMenuSize,
        MessageType::SetMenuSizeAck,
        MessageType::MenuItem,
        MessageType::Navigation,
        MessageType::NavigationResponse,
        MessageType::GetMenuItems,
        MessageType::GetTime,
        MessageType::GetTimeResponse,
        MessageType::SetVibrate,
        MessageType::SetVibrateAck,
        MessageType::Ack,
    ];

    #[inline]
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::CapsRequest),
            2 => Some(Self::CapsResponse),
            7 => Some(Self::DeviceStatus),
            8 => Some(Self::DeviceStatusAck),
            23 => Some(Self::SetMenuSize),
            24 => Some(Self::SetMenuSizeAck),
            26 => Some(Self::MenuItem),
            29 => Some(Self::Navigation),
            30 => Some(Self::NavigationResponse),
            35 => Some(Self::GetMenuItems),
            38 => Some(Self::GetTime),
            39 => Some(Self::GetTimeResponse),
            42 => Some(Self::SetVibrate),
            43 => Some(Self::SetVibrateAck),
            44 => Some(Self::Ack),
            _ => None,
        }
    }

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Stable name used in log fields.
    pub fn name(self) -> &'static str {
        match self {
            Self::CapsRequest => "CAPS_REQUEST",
            Self::CapsResponse => "CAPS_RESPONSE",
            Self::DeviceStatus => "DEVICE_STATUS",
            Self::DeviceStatusAck => "DEVICE_STATUS_ACK",
            Self::SetMenuSize => "SET_MENU_SIZE",
            Self::SetMenuSizeAck => "SET_MENU_SIZE_ACK",
            Self::MenuItem => "MENU_ITEM",
            Self::Navigation => "NAVIGATION",
            Self::NavigationResponse => "NAVIGATION_RESPONSE",
            Self::GetMenuItems => "GET_MENU_ITEMS",
            Self::GetTime => "GET_TIME",
            Self::GetTimeResponse => "GET_TIME_RESPONSE",
            Self::SetVibrate => "SET_VIBRATE",
            Self::SetVibrateAck => "SET_VIBRATE_ACK",
            Self::Ack => "ACK",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.id())
    }
}

/// One-byte code fields. Values the protocol does not assign are kept in
/// `Other` so they survive a decode/encode cycle.
macro_rules! wire_code {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            Other(u8),
        }

        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                match value {
                    $($value => $name::$variant,)+
                    other => $name::Other(other),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(code: $name) -> u8 {
                match code {
                    $($name::$variant => $value,)+
                    $name::Other(other) => other,
                }
            }
        }
    };
}

wire_code! {
    /// Result carried by navigation responses and peer acknowledgements.
    ResultCode {
        Ok = 0,
        Error = 1,
        OutOfMemory = 2,
        Exit = 3,
        Cancel = 4,
    }
}

wire_code! {
    /// How a navigation button was pressed.
    NavAction {
        Press = 0,
        LongPress = 1,
        DoublePress = 2,
    }
}

wire_code! {
    /// Which navigation input fired.
    NavType {
        Up = 0,
        Down = 1,
        Left = 2,
        Right = 3,
        Select = 4,
        MenuSelect = 5,
    }
}

wire_code! {
    /// Display state reported by the device.
    DeviceStatusCode {
        Off = 0,
        On = 1,
        Menu = 2,
    }
}

/// Display geometry and firmware details reported in the capabilities response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub width: u8,
    pub height: u8,
    pub statusbar_width: u8,
    pub statusbar_height: u8,
    pub view_width: u8,
    pub view_height: u8,
    pub announce_width: u8,
    pub announce_height: u8,
    pub text_chunk_size: u8,
    pub idle_timer: u8,
    pub software_version: String,
}

/// One menu entry shown on the device.
#[derive(Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub index: u8,
    /// Draws the entry as needing attention (alert style).
    pub attention: bool,
    /// Counter shown next to the entry, e.g. unread items.
    pub attribute: u16,
    pub label: String,
    /// Icon image, usually PNG.
    pub icon: Bytes,
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("index", &self.index)
            .field("attention", &self.attention)
            .field("attribute", &self.attribute)
            .field("label", &self.label)
            .field("icon", &format_args!("{} bytes", self.icon.len()))
            .finish()
    }
}

/// A decoded or to-be-encoded LiveView frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    CapsRequest,
    CapsResponse(Capabilities),
    DeviceStatus { status: DeviceStatusCode },
    DeviceStatusAck,
    SetMenuSize { menu_size: u8 },
    SetMenuSizeAck { result: ResultCode },
    MenuItem(MenuItem),
    Navigation { action: NavAction, nav_type: NavType },
    NavigationResponse { result: ResultCode },
    GetMenuItems,
    GetTime,
    /// `time` is local wall-clock time in seconds since the epoch.
    GetTimeResponse { time: u32, use_24h: bool },
    /// Vibrate after `delay` ms for `duration` ms.
    SetVibrate { delay: u16, duration: u16 },
    SetVibrateAck { result: ResultCode },
    /// Generic acknowledgement of the frame with type id `acked`.
    Ack { acked: u8 },
}

impl Message {
    pub fn message_type(&self) -> MessageType {
        match self {
            Message::CapsRequest => MessageType::CapsRequest,
            Message::CapsResponse(_) => MessageType::CapsResponse,
            Message::DeviceStatus { .. } => MessageType::DeviceStatus,
            Message::DeviceStatusAck => MessageType::DeviceStatusAck,
            Message::SetMenuSize { .. } => MessageType::SetMenuSize,
            Message::SetMenuSizeAck { .. } => MessageType::SetMenuSizeAck,
            Message::MenuItem(_) => MessageType::MenuItem,
            Message::Navigation { .. } => MessageType::Navigation,
            Message::NavigationResponse { .. } => MessageType::NavigationResponse,
            Message::GetMenuItems => MessageType::GetMenuItems,
            Message::GetTime => MessageType::GetTime,
            Message::GetTimeResponse { .. } => MessageType::GetTimeResponse,
            Message::SetVibrate { .. } => MessageType::SetVibrate,
            Message::SetVibrateAck { .. } => MessageType::SetVibrateAck,
            Message::Ack { .. } => MessageType::Ack,
        }
    }

    #[inline]
    pub fn type_id(&self) -> u8 {
        self.message_type().id()
    }

    /// Size of the encoded frame, type id included.
    pub fn encoded_len(&self) -> usize {
        fn field(len: usize) -> usize {
            2 + len.min(MAX_FIELD_LEN)
        }

        1 + match self {
            Message::CapsRequest
            | Message::DeviceStatusAck
            | Message::GetMenuItems
            | Message::GetTime => 0,
            Message::CapsResponse(caps) => 10 + field(caps.software_version.chars().count()),
            Message::DeviceStatus { .. }
            | Message::SetMenuSize { .. }
            | Message::SetMenuSizeAck { .. }
            | Message::NavigationResponse { .. }
            | Message::SetVibrateAck { .. }
            | Message::Ack { .. } => 1,
            Message::MenuItem(item) => {
                4 + field(item.label.chars().count()) + field(item.icon.len())
            }
            Message::Navigation { .. } => 2,
            Message::GetTimeResponse { .. } => 5,
            Message::SetVibrate { .. } => 4,
        }
    }

    /// Append this message's frame (type id, then payload) to `dst`.
    pub fn encode(&self, dst: &mut BytesMut, order: ByteOrder) {
        let mut w = WireWriter::new(dst, order);
        w.put_u8(self.type_id());

        match self {
            Message::CapsRequest
            | Message::DeviceStatusAck
            | Message::GetMenuItems
            | Message::GetTime => {}
            Message::CapsResponse(caps) => {
                w.put_u8(caps.width);
                w.put_u8(caps.height);
                w.put_u8(caps.statusbar_width);
                w.put_u8(caps.statusbar_height);
                w.put_u8(caps.view_width);
                w.put_u8(caps.view_height);
                w.put_u8(caps.announce_width);
                w.put_u8(caps.announce_height);
                w.put_u8(caps.text_chunk_size);
                w.put_u8(caps.idle_timer);
                w.put_text(&caps.software_version);
            }
            Message::DeviceStatus { status } => w.put_u8((*status).into()),
            Message::SetMenuSize { menu_size } => w.put_u8(*menu_size),
            Message::SetMenuSizeAck { result }
            | Message::NavigationResponse { result }
            | Message::SetVibrateAck { result } => w.put_u8((*result).into()),
            Message::MenuItem(item) => {
                w.put_u8(item.index);
                w.put_bool(item.attention);
                w.put_u16(item.attribute);
                w.put_text(&item.label);
                w.put_blob(&item.icon);
            }
            Message::Navigation { action, nav_type } => {
                w.put_u8((*action).into());
                w.put_u8((*nav_type).into());
            }
            Message::GetTimeResponse { time, use_24h } => {
                w.put_u32(*time);
                w.put_bool(*use_24h);
            }
            Message::SetVibrate { delay, duration } => {
                w.put_u16(*delay);
                w.put_u16(*duration);
            }
            Message::Ack { acked } => w.put_u8(*acked),
        }
    }

    /// Encode with the default (big-endian) byte order.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.encode(&mut buf, ByteOrder::default());
        buf.freeze()
    }
}
