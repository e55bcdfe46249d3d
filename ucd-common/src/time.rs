//! Timestamp utilities

use chrono::{DateTime, SubsecRound, Utc};

/// Current UTC timestamp, truncated to milliseconds.
///
/// Documents round-trip through JSON text, so sub-millisecond precision
/// would not survive a reload anyway.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Convert whole seconds to a duration
pub fn secs_to_duration(secs: u64) -> std::time::Duration {
    std::time::Duration::from_secs(secs)
}
