// test-only module included via protocol/mod.rs
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use bytes::Bytes;

use crate::config::ProtocolConfig;
use crate::protocol::dispatcher::{navigation_result, Dispatcher};
use crate::protocol::message::{
    Capabilities, DeviceStatusCode, Message, MessageType, NavAction, NavType, ResultCode,
};
use crate::utils::time::FixedClock;

const ICON: &[u8] = &[0x89, b'P', b'N', b'G'];

fn dispatcher() -> Dispatcher {
    dispatcher_with(ProtocolConfig::default())
}

fn dispatcher_with(config: ProtocolConfig) -> Dispatcher {
    Dispatcher::with_clock(
        config,
        Bytes::from_static(ICON),
        Box::new(FixedClock(1_700_000_000)),
    )
}

fn sample_inbound() -> Vec<Message> {
    vec![
        Message::CapsResponse(Capabilities::default()),
        Message::DeviceStatus {
            status: DeviceStatusCode::On,
        },
        Message::GetMenuItems,
        Message::GetTime,
        Message::Navigation {
            action: NavAction::Press,
            nav_type: NavType::Up,
        },
        Message::SetMenuSizeAck {
            result: ResultCode::Ok,
        },
        Message::SetVibrateAck {
            result: ResultCode::Ok,
        },
        Message::Ack { acked: 23 },
    ]
}

#[test]
fn test_every_message_is_acked_first() {
    let d = dispatcher();
    for msg in sample_inbound() {
        let out = d.respond(&msg);
        assert_eq!(
            out[0],
            Message::Ack {
                acked: msg.type_id()
            },
            "first response to {msg:?}"
        );
        let acks = out
            .iter()
            .filter(|m| m.message_type() == MessageType::Ack)
            .count();
        assert_eq!(acks, 1, "acks sent for {msg:?}");
    }
}

#[test]
fn test_caps_response_sequence() {
    let out = dispatcher().respond(&Message::CapsResponse(Capabilities {
        width: 128,
        height: 128,
        software_version: "0.0.3".to_string(),
        ..Capabilities::default()
    }));

    assert_eq!(
        out,
        vec![
            Message::Ack { acked: 2 },
            Message::SetMenuSize { menu_size: 1 },
            Message::SetVibrate {
                delay: 0,
                duration: 50
            },
        ]
    );
}

#[test]
fn test_get_time_uses_clock_and_24h_flag() {
    let out = dispatcher().respond(&Message::GetTime);
    assert_eq!(
        out,
        vec![
            Message::Ack { acked: 38 },
            Message::GetTimeResponse {
                time: 1_700_000_000,
                use_24h: true
            },
        ]
    );
}

#[test]
fn test_device_status_is_acknowledged() {
    let out = dispatcher().respond(&Message::DeviceStatus {
        status: DeviceStatusCode::Menu,
    });
    assert_eq!(out, vec![Message::Ack { acked: 7 }, Message::DeviceStatusAck]);
}

#[test]
fn test_menu_item_carries_label_and_icon() {
    let out = dispatcher().respond(&Message::GetMenuItems);
    assert_eq!(out.len(), 2);

    match &out[1] {
        Message::MenuItem(item) => {
            assert_eq!(item.index, 0);
            assert!(!item.attention);
            assert_eq!(item.attribute, 0);
            assert_eq!(item.label, "Test");
            assert_eq!(&item.icon[..], ICON);
        }
        other => panic!("Expected MenuItem, got {other:?}"),
    }
}

#[test]
fn test_navigation_policy() {
    let actions = [
        NavAction::Press,
        NavAction::LongPress,
        NavAction::DoublePress,
        NavAction::Other(9),
    ];
    let types = [
        NavType::Up,
        NavType::Down,
        NavType::Left,
        NavType::Right,
        NavType::Select,
        NavType::MenuSelect,
        NavType::Other(9),
    ];

    for action in actions {
        for nav_type in types {
            let expected = if action == NavAction::Press && nav_type == NavType::MenuSelect {
                ResultCode::Ok
            } else {
                ResultCode::Cancel
            };
            assert_eq!(navigation_result(action, nav_type), expected);

            let out = dispatcher().respond(&Message::Navigation { action, nav_type });
            assert_eq!(
                out,
                vec![
                    Message::Ack { acked: 29 },
                    Message::NavigationResponse { result: expected },
                ]
            );
        }
    }
}

#[test]
fn test_acks_only_for_peer_acknowledgements() {
    let d = dispatcher();
    assert_eq!(
        d.respond(&Message::SetVibrateAck {
            result: ResultCode::Ok
        }),
        vec![Message::Ack { acked: 43 }]
    );
    assert_eq!(
        d.respond(&Message::Ack { acked: 42 }),
        vec![Message::Ack { acked: 44 }]
    );
}

#[test]
fn test_ack_of_ack_can_be_disabled() {
    let d = dispatcher_with(ProtocolConfig {
        ack_acknowledgements: false,
        ..ProtocolConfig::default()
    });

    assert!(d.respond(&Message::Ack { acked: 42 }).is_empty());
    assert_eq!(
        d.respond(&Message::SetMenuSizeAck {
            result: ResultCode::Ok
        }),
        vec![Message::Ack { acked: 24 }]
    );
}

#[test]
fn test_configured_responses() {
    let d = dispatcher_with(ProtocolConfig {
        menu_size: 3,
        vibrate_delay_ms: 10,
        vibrate_duration_ms: 500,
        menu_label: "Phone".to_string(),
        use_24h_clock: false,
        ..ProtocolConfig::default()
    });

    let caps = d.respond(&Message::CapsResponse(Capabilities::default()));
    assert_eq!(caps[1], Message::SetMenuSize { menu_size: 3 });
    assert_eq!(
        caps[2],
        Message::SetVibrate {
            delay: 10,
            duration: 500
        }
    );

    let time = d.respond(&Message::GetTime);
    assert!(matches!(
        time[1],
        Message::GetTimeResponse { use_24h: false, .. }
    ));

    let menu = d.respond(&Message::GetMenuItems);
    assert!(matches!(&menu[1], Message::MenuItem(item) if item.label == "Phone"));
}
