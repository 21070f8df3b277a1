use bytes::Bytes;
use tracing::trace;

use crate::config::ProtocolConfig;
use crate::protocol::message::{Message, MenuItem, NavAction, NavType, ResultCode};
use crate::utils::time::{Clock, SystemClock};

/// Maps each inbound message to the frames the host sends back.
///
/// Responding is pure apart from reading the clock: the session writes the
/// returned frames in order and nothing here touches the stream.
pub struct Dispatcher {
    config: ProtocolConfig,
    icon: Bytes,
    clock: Box<dyn Clock>,
}

impl Dispatcher {
    pub fn new(config: ProtocolConfig, icon: Bytes) -> Self {
        Self::with_clock(config, icon, Box::new(SystemClock))
    }

    pub fn with_clock(config: ProtocolConfig, icon: Bytes, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            icon,
            clock,
        }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Frames to send for `msg`, acknowledgement first.
    pub fn respond(&self, msg: &Message) -> Vec<Message> {
        let mut out = Vec::with_capacity(3);

        if self.should_ack(msg) {
            out.push(Message::Ack {
                acked: msg.type_id(),
            });
        }

        match msg {
            Message::CapsResponse(caps) => {
                trace!(software_version = %caps.software_version, "Capabilities received");
                out.push(Message::SetMenuSize {
                    menu_size: self.config.menu_size,
                });
                out.push(Message::SetVibrate {
                    delay: self.config.vibrate_delay_ms,
                    duration: self.config.vibrate_duration_ms,
                });
            }
            Message::GetTime => out.push(Message::GetTimeResponse {
                time: self.clock.local_seconds(),
                use_24h: self.config.use_24h_clock,
            }),
            Message::DeviceStatus { .. } => out.push(Message::DeviceStatusAck),
            Message::GetMenuItems => out.push(Message::MenuItem(MenuItem {
                index: 0,
                attention: false,
                attribute: 0,
                label: self.config.menu_label.clone(),
                icon: self.icon.clone(),
            })),
            Message::Navigation { action, nav_type } => {
                out.push(Message::NavigationResponse {
                    result: navigation_result(*action, *nav_type),
                })
            }
            _ => {}
        }

        out
    }

    fn should_ack(&self, msg: &Message) -> bool {
        self.config.ack_acknowledgements || !matches!(msg, Message::Ack { .. })
    }
}

/// Only a plain press on the menu entry is accepted.
#[inline]
pub fn navigation_result(action: NavAction, nav_type: NavType) -> ResultCode {
    match (action, nav_type) {
        (NavAction::Press, NavType::MenuSelect) => ResultCode::Ok,
        _ => ResultCode::Cancel,
    }
}
