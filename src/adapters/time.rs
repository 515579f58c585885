//! Wall-clock time adapter.
//!
//! Fixes are stamped in epoch milliseconds by the location subsystem.
//! Replayed records may omit the stamp; they get "now" from here.

use std::time::{SystemTime, UNIX_EPOCH};

/// Wall clock for the host platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }

    /// Milliseconds since the Unix epoch.  A clock set before 1970 reads
    /// as `0`.
    pub fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
    }
}
