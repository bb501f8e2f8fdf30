//! Calendar trigger derivation for reminder alerts.

use chrono::{Datelike, Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

/// Local wall-clock components an alert fires at.
///
/// Seconds and sub-second precision are dropped: an alert set
/// for 10:00:45 fires at 10:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarTrigger {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl CalendarTrigger {
    /// Converts an epoch-millisecond instant into local calendar components.
    ///
    /// Returns `None` when the instant is outside chrono's representable range.
    pub fn from_epoch_ms(epoch_ms: i64) -> Option<Self> {
        let local = Local.timestamp_millis_opt(epoch_ms).single()?;
        Some(Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
        })
    }
}
