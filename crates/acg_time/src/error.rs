//! Error types for instant construction and sidereal resolution.

use thiserror::Error;

/// Errors from building instants or configuring the sidereal resolver.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Calendar fields do not name a real UTC instant.
    #[error("invalid calendar date/time: {0}")]
    InvalidCalendar(String),
    /// Text could not be parsed as an RFC 3339 timestamp.
    #[error("cannot parse instant {input:?}: {message}")]
    Parse { input: String, message: String },
    /// A numeric input was NaN or infinite.
    #[error("non-finite value: {0}")]
    NonFinite(&'static str),
    /// UT1 - UTC offset outside the IERS bound of 0.9 s.
    #[error("DUT1 {0} s outside [-0.9, 0.9]")]
    Dut1OutOfRange(f64),
}
