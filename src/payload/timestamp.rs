//! Submission timestamps

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current instant
pub trait Clock {
    /// Current UTC instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Format an instant as ISO 8601 with milliseconds and a `Z` suffix
///
/// Example: `2026-01-06T16:59:37.571Z`
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current instant of `clock`, formatted for the payload
#[must_use]
pub fn timestamp_now(clock: &dyn Clock) -> String {
    format_timestamp(clock.now())
}
