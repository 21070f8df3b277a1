//! # Configuration Management
//!
//! Centralized configuration for the LiveView host service.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment variables via `from_env()`
//!
//! Every section and field has a default, so a config file only needs the
//! values it changes:
//!
//! ```toml
//! [server]
//! transport = "unix"
//! address = "/tmp/liveview.sock"
//!
//! [protocol]
//! menu_label = "Phone"
//! ```

use crate::core::wire::{ByteOrder, MAX_FIELD_LEN};
use crate::error::{constants, ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

/// Default listen address for the TCP transport
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:7700";

/// Bytes requested per stream read
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;

/// Label of the single menu entry
pub const DEFAULT_MENU_LABEL: &str = "Test";

/// Menu icon location relative to the working directory
pub const DEFAULT_MENU_ICON_PATH: &str = "assets/menu_blank.png";

/// Main configuration structure that contains all configurable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LiveViewConfig {
    /// Listener and stream settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Protocol behavior and fixed response parameters
    #[serde(default)]
    pub protocol: ProtocolConfig,

    /// Static assets
    #[serde(default)]
    pub assets: AssetConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LiveViewConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_OPEN))
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_READ))
        })?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_PARSE)))
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        Ok(Self::default().with_env_overrides())
    }

    /// Override fields from `LIVEVIEW_*` environment variables.
    ///
    /// Values that fail to parse are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(addr) = std::env::var("LIVEVIEW_SERVER_ADDRESS") {
            self.server.address = addr;
        }

        if let Ok(kind) = std::env::var("LIVEVIEW_TRANSPORT") {
            if let Ok(val) = kind.parse::<TransportKind>() {
                self.server.transport = val;
            }
        }

        if let Ok(timeout) = std::env::var("LIVEVIEW_READ_TIMEOUT_MS") {
            if let Ok(val) = timeout.parse::<u64>() {
                self.server.read_timeout = Duration::from_millis(val);
            }
        }

        if let Ok(order) = std::env::var("LIVEVIEW_BYTE_ORDER") {
            if let Ok(val) = order.parse::<ByteOrder>() {
                self.protocol.byte_order = val;
            }
        }

        if let Ok(icon) = std::env::var("LIVEVIEW_MENU_ICON") {
            self.assets.menu_icon_path = PathBuf::from(icon);
        }

        if let Ok(level) = std::env::var("LIVEVIEW_LOG_LEVEL") {
            if let Ok(val) = level.parse::<Level>() {
                self.logging.log_level = val;
            }
        }

        self
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_SERIALIZE))
        })?;

        std::fs::write(path, content).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_WRITE))
        })?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.server.validate());
        errors.extend(self.protocol.validate());
        errors.extend(self.assets.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "{}:\n  - {}",
                constants::ERR_CONFIG_INVALID,
                errors.join("\n  - ")
            )))
        }
    }
}

/// Stream transport the host listens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Tcp,
    Unix,
}

impl std::str::FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Ok(TransportKind::Tcp),
            "unix" => Ok(TransportKind::Unix),
            other => Err(format!("Invalid transport: {other}")),
        }
    }
}

/// Server-specific configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: TransportKind,

    /// Listen address: "host:port" for TCP, a socket path for Unix
    pub address: String,

    /// Maximum bytes read from the stream at once
    pub read_buffer_size: usize,

    /// Idle read timeout, zero disables it
    #[serde(with = "duration_serde")]
    pub read_timeout: Duration,

    /// Pause after a failed accept before trying again
    #[serde(with = "duration_serde")]
    pub accept_retry_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::Tcp,
            address: String::from(DEFAULT_ADDRESS),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            read_timeout: Duration::ZERO,
            accept_retry_delay: Duration::from_millis(100),
        }
    }
}

impl ServerConfig {
    /// `None` when the read timeout is disabled
    pub fn read_timeout(&self) -> Option<Duration> {
        (!self.read_timeout.is_zero()).then_some(self.read_timeout)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.address.is_empty() {
            errors.push("Server address cannot be empty".to_string());
        } else {
            match self.transport {
                TransportKind::Tcp => {
                    if self.address.parse::<std::net::SocketAddr>().is_err() {
                        errors.push(format!(
                            "Invalid server address format: '{}' (expected format: '127.0.0.1:7700')",
                            self.address
                        ));
                    }
                }
                TransportKind::Unix => {
                    if !cfg!(unix) {
                        errors.push(
                            "Unix socket transport is not supported on this platform".to_string(),
                        );
                    }
                }
            }
        }

        if self.read_buffer_size == 0 {
            errors.push("Read buffer size must be greater than 0".to_string());
        } else if self.read_buffer_size > 65536 {
            errors.push(format!(
                "Read buffer size too large: {} (maximum: 65536)",
                self.read_buffer_size
            ));
        }

        if !self.read_timeout.is_zero() && self.read_timeout.as_millis() < 100 {
            errors.push("Read timeout too short (minimum: 100ms, or 0 to disable)".to_string());
        }

        if self.accept_retry_delay.as_secs() > 60 {
            errors.push("Accept retry delay too long (maximum: 60s)".to_string());
        }

        errors
    }
}

/// Protocol behavior and the fixed values sent in responses
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Byte order of multi-byte fields and length prefixes
    pub byte_order: ByteOrder,

    /// Whether inbound acknowledgement frames are themselves acknowledged
    pub ack_acknowledgements: bool,

    /// Menu slots announced after the capabilities exchange
    pub menu_size: u8,

    /// Vibration delay sent after the capabilities exchange
    pub vibrate_delay_ms: u16,

    /// Vibration length sent after the capabilities exchange
    pub vibrate_duration_ms: u16,

    /// Label of the menu entry
    pub menu_label: String,

    /// Ask the device to show 24-hour time
    pub use_24h_clock: bool,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Big,
            ack_acknowledgements: true,
            menu_size: 1,
            vibrate_delay_ms: 0,
            vibrate_duration_ms: 50,
            menu_label: String::from(DEFAULT_MENU_LABEL),
            use_24h_clock: true,
        }
    }
}

impl ProtocolConfig {
    /// Validate protocol configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.menu_size == 0 {
            errors.push("Menu size must be greater than 0".to_string());
        }

        if self.menu_label.is_empty() {
            errors.push("Menu label cannot be empty".to_string());
        } else if self.menu_label.chars().count() > MAX_FIELD_LEN {
            errors.push(format!(
                "Menu label too long: {} characters (maximum: {MAX_FIELD_LEN})",
                self.menu_label.chars().count()
            ));
        }

        if self.vibrate_duration_ms == 0 {
            errors.push("Vibrate duration must be greater than 0".to_string());
        }

        errors
    }
}

/// Static asset locations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Icon shown next to the menu entry
    pub menu_icon_path: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            menu_icon_path: PathBuf::from(DEFAULT_MENU_ICON_PATH),
        }
    }
}

impl AssetConfig {
    /// Validate asset configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.menu_icon_path.as_os_str().is_empty() {
            errors.push("Menu icon path cannot be empty".to_string());
        }
        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,

    /// Whether to log to file
    pub log_to_file: bool,

    /// Path to log file (if log_to_file is true)
    pub log_file_path: Option<String>,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("liveview-host"),
            log_level: Level::INFO,
            log_to_console: true,
            log_to_file: false,
            log_file_path: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        if self.log_to_file {
            if let Some(ref path) = self.log_file_path {
                if let Some(parent) = Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        errors.push(format!(
                            "Log file directory does not exist: {}",
                            parent.display()
                        ));
                    }
                }
            } else {
                errors.push("log_file_path must be specified when log_to_file is true".to_string());
            }
        }

        if !self.log_to_console && !self.log_to_file {
            errors
                .push("At least one logging output (console or file) must be enabled".to_string());
        }

        errors
    }
}

/// Durations are stored as whole milliseconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

/// Levels are stored as lowercase names
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        level.as_str().to_ascii_lowercase().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
