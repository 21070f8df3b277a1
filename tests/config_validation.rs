//! Integration tests for configuration loading and validation

#![allow(clippy::expect_used, clippy::unwrap_used)]

use openliveview::config::{
    AssetConfig, LiveViewConfig, LoggingConfig, ProtocolConfig, ServerConfig, TransportKind,
};
use openliveview::core::wire::{ByteOrder, MAX_FIELD_LEN};
use openliveview::error::ProtocolError;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

#[test]
fn test_default_config_validates() {
    let config = LiveViewConfig::default();
    let errors = config.validate();
    assert!(
        errors.is_empty(),
        "Default config should be valid, but got errors: {:?}",
        errors
    );
}

#[test]
fn test_defaults_match_device_expectations() {
    let config = LiveViewConfig::default();
    assert_eq!(config.server.transport, TransportKind::Tcp);
    assert_eq!(config.server.address, "127.0.0.1:7700");
    assert_eq!(config.server.read_buffer_size, 4096);
    assert_eq!(config.server.read_timeout(), None);
    assert_eq!(config.protocol.byte_order, ByteOrder::Big);
    assert!(config.protocol.ack_acknowledgements);
    assert_eq!(config.protocol.menu_size, 1);
    assert_eq!(config.protocol.vibrate_delay_ms, 0);
    assert_eq!(config.protocol.vibrate_duration_ms, 50);
    assert_eq!(config.protocol.menu_label, "Test");
    assert!(config.protocol.use_24h_clock);
    assert_eq!(
        config.assets.menu_icon_path,
        PathBuf::from("assets/menu_blank.png")
    );
}

#[test]
fn test_invalid_server_address() {
    let mut config = LiveViewConfig::default();
    config.server.address = "invalid_address".to_string();

    let errors = config.validate();
    assert!(!errors.is_empty(), "Should have validation errors");
    assert!(errors.iter().any(|e| e.contains("Invalid server address")));
}

#[test]
fn test_empty_server_address() {
    let mut config = LiveViewConfig::default();
    config.server.address = String::new();

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("cannot be empty")));
}

#[cfg(unix)]
#[test]
fn test_unix_socket_path_is_not_parsed_as_address() {
    let mut config = LiveViewConfig::default();
    config.server.transport = TransportKind::Unix;
    config.server.address = "/tmp/liveview.sock".to_string();

    assert!(config.validate().is_empty());
}

#[test]
fn test_read_buffer_bounds() {
    let mut config = LiveViewConfig::default();
    config.server.read_buffer_size = 0;
    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("Read buffer size must be greater than 0")));

    config.server.read_buffer_size = 65537;
    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("Read buffer size too large")));

    config.server.read_buffer_size = 65536;
    assert!(config.validate().is_empty());
}

#[test]
fn test_short_read_timeout() {
    let mut config = LiveViewConfig::default();
    config.server.read_timeout = Duration::from_millis(50);

    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("Read timeout too short")));
}

#[test]
fn test_long_accept_retry_delay() {
    let mut config = LiveViewConfig::default();
    config.server.accept_retry_delay = Duration::from_secs(120);

    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("Accept retry delay too long")));
}

#[test]
fn test_zero_menu_size() {
    let mut config = LiveViewConfig::default();
    config.protocol.menu_size = 0;

    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("Menu size must be greater than 0")));
}

#[test]
fn test_menu_label_bounds() {
    let mut config = LiveViewConfig::default();
    config.protocol.menu_label = String::new();
    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("Menu label cannot be empty")));

    config.protocol.menu_label = "m".repeat(MAX_FIELD_LEN + 1);
    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("Menu label too long")));
}

#[test]
fn test_zero_vibrate_duration() {
    let mut config = LiveViewConfig::default();
    config.protocol.vibrate_duration_ms = 0;

    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("Vibrate duration must be greater than 0")));
}

#[test]
fn test_empty_icon_path() {
    let mut config = LiveViewConfig::default();
    config.assets.menu_icon_path = PathBuf::new();

    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("Menu icon path cannot be empty")));
}

#[test]
fn test_empty_app_name() {
    let mut config = LiveViewConfig::default();
    config.logging.app_name = String::new();

    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("Application name cannot be empty")));
}

#[test]
fn test_log_to_file_without_path() {
    let mut config = LiveViewConfig::default();
    config.logging.log_to_file = true;
    config.logging.log_file_path = None;

    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("log_file_path must be specified")));
}

#[test]
fn test_no_logging_outputs() {
    let mut config = LiveViewConfig::default();
    config.logging.log_to_console = false;
    config.logging.log_to_file = false;

    assert!(config
        .validate()
        .iter()
        .any(|e| e.contains("At least one logging output")));
}

#[test]
fn test_validate_strict_with_valid_config() {
    assert!(LiveViewConfig::default().validate_strict().is_ok());
}

#[test]
fn test_validate_strict_with_invalid_config() {
    let mut config = LiveViewConfig::default();
    config.server.address = "invalid".to_string();
    config.protocol.menu_size = 0;

    match config.validate_strict() {
        Err(ProtocolError::ConfigError(msg)) => {
            assert!(msg.contains("Configuration validation failed"));
            assert!(msg.contains("Invalid server address"));
            assert!(msg.contains("Menu size"));
        }
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_full_toml_config() {
    let config = LiveViewConfig::from_toml(
        r#"
        [server]
        transport = "tcp"
        address = "0.0.0.0:7701"
        read_buffer_size = 1024
        read_timeout = 30000
        accept_retry_delay = 250

        [protocol]
        byte_order = "little"
        ack_acknowledgements = false
        menu_size = 2
        vibrate_delay_ms = 5
        vibrate_duration_ms = 200
        menu_label = "Phone"
        use_24h_clock = false

        [assets]
        menu_icon_path = "/usr/share/liveview/menu.png"

        [logging]
        app_name = "liveview"
        log_level = "debug"
        log_to_console = true
        log_to_file = false
        json_format = true
        "#,
    )
    .unwrap();

    assert_eq!(config.server.address, "0.0.0.0:7701");
    assert_eq!(config.server.read_buffer_size, 1024);
    assert_eq!(config.server.read_timeout(), Some(Duration::from_secs(30)));
    assert_eq!(config.server.accept_retry_delay, Duration::from_millis(250));
    assert_eq!(config.protocol.byte_order, ByteOrder::Little);
    assert!(!config.protocol.ack_acknowledgements);
    assert_eq!(config.protocol.menu_size, 2);
    assert_eq!(config.protocol.vibrate_duration_ms, 200);
    assert!(!config.protocol.use_24h_clock);
    assert_eq!(
        config.assets.menu_icon_path,
        PathBuf::from("/usr/share/liveview/menu.png")
    );
    assert_eq!(config.logging.log_level, Level::DEBUG);
    assert!(config.logging.json_format);
    assert!(config.validate().is_empty());
}

#[test]
fn test_invalid_toml_values() {
    let bad_level = LiveViewConfig::from_toml("[logging]\nlog_level = \"loud\"");
    assert!(matches!(bad_level, Err(ProtocolError::ConfigError(_))));

    let bad_transport = LiveViewConfig::from_toml("[server]\ntransport = \"bluetooth\"");
    assert!(matches!(bad_transport, Err(ProtocolError::ConfigError(_))));
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("liveview.toml");

    let config = LiveViewConfig::default_with_overrides(|c| {
        c.server.read_timeout = Duration::from_millis(1500);
        c.protocol.menu_label = "Saved".to_string();
    });
    config.save_to_file(&path).unwrap();

    let loaded = LiveViewConfig::from_file(&path).unwrap();
    assert_eq!(loaded.server.read_timeout, Duration::from_millis(1500));
    assert_eq!(loaded.protocol.menu_label, "Saved");
    assert_eq!(loaded.logging.log_level, Level::INFO);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = LiveViewConfig::from_file(dir.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to open config file"));
}

#[test]
fn test_env_overrides() {
    std::env::set_var("LIVEVIEW_SERVER_ADDRESS", "127.0.0.1:9900");
    std::env::set_var("LIVEVIEW_BYTE_ORDER", "le");
    std::env::set_var("LIVEVIEW_READ_TIMEOUT_MS", "not-a-number");

    let config = LiveViewConfig::from_env().unwrap();

    std::env::remove_var("LIVEVIEW_SERVER_ADDRESS");
    std::env::remove_var("LIVEVIEW_BYTE_ORDER");
    std::env::remove_var("LIVEVIEW_READ_TIMEOUT_MS");

    assert_eq!(config.server.address, "127.0.0.1:9900");
    assert_eq!(config.protocol.byte_order, ByteOrder::Little);
    assert_eq!(config.server.read_timeout(), None);
}

#[test]
fn test_section_structs_are_public() {
    let config = LiveViewConfig {
        server: ServerConfig::default(),
        protocol: ProtocolConfig {
            menu_label: "Custom".to_string(),
            ..ProtocolConfig::default()
        },
        assets: AssetConfig::default(),
        logging: LoggingConfig::default(),
    };
    assert!(config.validate().is_empty());
}
