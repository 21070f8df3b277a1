//! Wall-clock source for time responses.

use chrono::Local;

/// Supplies the time sent in `GetTimeResponse`.
pub trait Clock: Send + Sync {
    /// Local wall-clock time as seconds since the epoch.
    ///
    /// The device has no time zone setting, so the local offset is folded in.
    fn local_seconds(&self) -> u32;
}

/// Reads the system clock and time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_seconds(&self) -> u32 {
        let now = Local::now();
        let local = now.timestamp() + i64::from(now.offset().local_minus_utc());
        local.clamp(0, i64::from(u32::MAX)) as u32
    }
}

/// Always reports the same instant. Useful in tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u32);

impl Clock for FixedClock {
    fn local_seconds(&self) -> u32 {
        self.0
    }
}
