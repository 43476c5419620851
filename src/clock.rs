//! Wall-clock helpers

use chrono::{Local, SecondsFormat, Utc};

use crate::id::{IdError, IdResult};

/// Current Unix timestamp in whole seconds
pub fn unix_now() -> IdResult<u64> {
    let secs = Utc::now().timestamp();
    u64::try_from(secs).map_err(|_| IdError::Clock(format!("{} is before the Unix epoch", secs)))
}

/// Current local time as ISO-8601 with milliseconds and numeric offset,
/// e.g. `2024-05-01T13:04:05.123+08:00`
pub fn time_now() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Millis, false)
}
