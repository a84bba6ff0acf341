//! Time handling for the astro-cartography engine.
//!
//! This crate provides:
//! - [`UtcInstant`], the immutable UTC timestamp every request is keyed on
//! - Julian Date conversions
//! - Earth Rotation Angle, GMST and local sidereal time
//! - [`SiderealResolver`], which turns an instant (or a known midheaven
//!   longitude) into the sidereal angle used by the line projectors

pub mod error;
pub mod instant;
pub mod julian;
pub mod sidereal;

pub use error::TimeError;
pub use instant::UtcInstant;
pub use julian::{J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd};
pub use sidereal::{
    SiderealResolver, earth_rotation_angle_rad, gmst_deg, gmst_rad, local_sidereal_time_deg,
    local_sidereal_time_rad, sidereal_from_mc_longitude_deg,
};
