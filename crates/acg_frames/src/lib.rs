//! Frame and surface geometry helpers.
//!
//! Provides longitude normalization and circular distances, the J2000
//! obliquity with ecliptic → equatorial conversion, equatorial →
//! horizontal conversion for an observer, and spherical-Earth geodesics.

pub mod angle;
pub mod horizontal;
pub mod obliquity;
pub mod spherical;

pub use angle::{circular_distance_deg, normalize_360, normalize_lon_180, signed_delta_deg};
pub use horizontal::{HorizontalCoords, ecliptic_to_equatorial, equatorial_to_horizontal};
pub use obliquity::OBLIQUITY_J2000_DEG;
pub use spherical::{
    EARTH_MEAN_RADIUS_KM, destination_point, great_circle_distance_deg, great_circle_distance_km,
    initial_bearing_deg,
};
