//! Receiver time to GNSS-epoch instants.

use chrono::{DateTime, Utc};
use std::fmt;

/// Seconds between the Unix epoch and 1980-01-06T00:00:00.
const GNSS_EPOCH_UNIX_SECONDS: i64 = 315_964_800;
const SECONDS_PER_WEEK: i64 = 7 * 86_400;

/// Time elapsed since the GNSS epoch, without leap seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GnssInstant {
    pub seconds: i64,
    pub millis: u32,
}

pub fn to_instant(week_number: u16, time_of_week_ms: u32) -> GnssInstant {
    let tow_seconds = i64::from(time_of_week_ms / 1_000);
    GnssInstant {
        seconds: i64::from(week_number) * SECONDS_PER_WEEK + tow_seconds,
        millis: time_of_week_ms % 1_000,
    }
}

impl GnssInstant {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(
            GNSS_EPOCH_UNIX_SECONDS + self.seconds,
            self.millis * 1_000_000,
        )
    }
}

impl fmt::Display for GnssInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(datetime) => write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S%.3f")),
            None => write!(f, "{}.{:03}s", self.seconds, self.millis),
        }
    }
}
