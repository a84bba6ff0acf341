//! Julian Date helpers.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Gregorian calendar date to Julian Date.
///
/// `day` may carry a fractional part for the time of day.
/// Source: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 7.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day + b
        - 1524.5
}

/// Seconds since the Unix epoch to Julian Date.
pub fn unix_seconds_to_jd(unix_s: f64) -> f64 {
    UNIX_EPOCH_JD + unix_s / SECONDS_PER_DAY
}
