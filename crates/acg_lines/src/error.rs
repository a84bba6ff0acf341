//! Validation errors for projection inputs.
//!
//! Geometric non-matches (no horizon crossing, point outside a curve's
//! latitude range) are never errors; they show up as absent samples or
//! empty match lists.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum LineError {
    #[error("latitude {0} outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("declination {0} outside [-90, 90]")]
    InvalidDeclination(f64),
    #[error("non-finite value: {0}")]
    NonFinite(&'static str),
    #[error("invalid latitude grid: {0}")]
    InvalidGrid(&'static str),
    #[error("invalid tolerance {0}")]
    InvalidTolerance(f64),
    #[error("invalid local-space config: {0}")]
    InvalidLocalSpace(&'static str),
}
