//! # Utility Modules
//!
//! Supporting utilities for the host service.
//!
//! ## Components
//! - **Assets**: one-time loading of the menu icon
//! - **Logging**: Structured logging configuration
//! - **Metrics**: Thread-safe observability counters
//! - **Time**: Wall-clock source for time responses

pub mod assets;
pub mod logging;
pub mod metrics;
pub mod time;

pub use metrics::{Metrics, MetricsSnapshot};
pub use time::{Clock, FixedClock, SystemClock};
