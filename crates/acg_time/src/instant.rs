//! UTC instant used as the key of every projection request.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, unix_seconds_to_jd};

/// An immutable UTC timestamp.
///
/// Hashable and totally ordered so it can key memoization tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtcInstant(DateTime<Utc>);

impl UtcInstant {
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Build an instant from UTC calendar fields.
    ///
    /// `sec` may be fractional and must lie in [0, 60).
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: f64,
    ) -> Result<Self, TimeError> {
        if !sec.is_finite() {
            return Err(TimeError::NonFinite("seconds"));
        }
        if !(0.0..60.0).contains(&sec) {
            return Err(TimeError::InvalidCalendar(format!(
                "seconds {sec} outside [0, 60)"
            )));
        }
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, 0))
            .ok_or_else(|| {
                TimeError::InvalidCalendar(format!(
                    "{year:04}-{month:02}-{day:02}T{hour:02}:{min:02}"
                ))
            })?;
        let nanos = (sec * 1.0e9).round() as i64;
        Ok(Self(Utc.from_utc_datetime(&naive) + Duration::nanoseconds(nanos)))
    }

    /// 12:00 UTC on the given calendar date.
    ///
    /// Transit charts are cast for noon UTC of the day of interest.
    pub fn noon_utc(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        Self::from_calendar(year, month, day, 12, 0, 0.0)
    }

    pub fn datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Seconds since the Unix epoch, including the sub-second part.
    pub fn unix_seconds(self) -> f64 {
        self.0.timestamp() as f64 + f64::from(self.0.timestamp_subsec_nanos()) * 1.0e-9
    }

    /// Julian Date in UTC.
    pub fn jd_utc(self) -> f64 {
        unix_seconds_to_jd(self.unix_seconds())
    }

    /// Julian Date in UT1, given DUT1 = UT1 - UTC in seconds.
    pub fn jd_ut1(self, dut1_seconds: f64) -> f64 {
        self.jd_utc() + dut1_seconds / SECONDS_PER_DAY
    }
}

impl From<DateTime<Utc>> for UtcInstant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl FromStr for UtcInstant {
    type Err = TimeError;

    /// Parse an RFC 3339 timestamp; any offset is converted to UTC.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| TimeError::Parse {
                input: s.to_string(),
                message: e.to_string(),
            })
    }
}

impl Display for UtcInstant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
