//! Ecliptic → equatorial and equatorial → horizontal conversions.

use serde::{Deserialize, Serialize};

use crate::angle::normalize_360;

/// Apparent horizon coordinates of a body for one observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalCoords {
    /// Azimuth in degrees, 0 = north, clockwise, range [0, 360).
    pub azimuth_deg: f64,
    /// Altitude above the geometric horizon in degrees, range [-90, 90].
    pub altitude_deg: f64,
}

/// Ecliptic (λ, β) to equatorial (α, δ) for obliquity ε, all in degrees.
///
/// Returns `(ra_deg, dec_deg)` with RA in [0, 360).
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> (f64, f64) {
    let l = lon_deg.to_radians();
    let b = lat_deg.to_radians();
    let e = obliquity_deg.to_radians();

    let ra = f64::atan2(l.sin() * e.cos() - b.tan() * e.sin(), l.cos());
    let dec = (b.sin() * e.cos() + b.cos() * e.sin() * l.sin())
        .clamp(-1.0, 1.0)
        .asin();
    (normalize_360(ra.to_degrees()), dec.to_degrees())
}

/// Equatorial coordinates to azimuth/altitude for an observer at
/// latitude `lat_deg` whose local sidereal angle is `lst_deg`.
///
/// Hour angle `H = LST − α`, measured westward.
pub fn equatorial_to_horizontal(
    ra_deg: f64,
    dec_deg: f64,
    lst_deg: f64,
    lat_deg: f64,
) -> HorizontalCoords {
    let h = (lst_deg - ra_deg).to_radians();
    let d = dec_deg.to_radians();
    let p = lat_deg.to_radians();

    let alt = (p.sin() * d.sin() + p.cos() * d.cos() * h.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let az = f64::atan2(-h.sin() * d.cos(), d.sin() * p.cos() - d.cos() * p.sin() * h.cos());

    HorizontalCoords {
        azimuth_deg: normalize_360(az.to_degrees()),
        altitude_deg: alt.to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obliquity::OBLIQUITY_J2000_DEG;

    #[test]
    fn transit_is_due_south_for_northern_observer() {
        // Body on the meridian (H = 0), south of the zenith.
        let hz = equatorial_to_horizontal(100.0, 10.0, 100.0, 40.0);
        assert!((hz.azimuth_deg - 180.0).abs() < 1e-9);
        assert!((hz.altitude_deg - 60.0).abs() < 1e-9);
    }

    #[test]
    fn rising_body_is_in_the_east() {
        // Equator observer, body on the celestial equator, H = -90°.
        let hz = equatorial_to_horizontal(90.0, 0.0, 0.0, 0.0);
        assert!((hz.azimuth_deg - 90.0).abs() < 1e-9);
        assert!(hz.altitude_deg.abs() < 1e-9);
    }

    #[test]
    fn setting_body_is_in_the_west() {
        let hz = equatorial_to_horizontal(0.0, 0.0, 90.0, 0.0);
        assert!((hz.azimuth_deg - 270.0).abs() < 1e-9);
    }

    #[test]
    fn pole_star_altitude_equals_latitude() {
        let hz = equatorial_to_horizontal(37.95, 90.0, 211.0, 51.5);
        assert!((hz.altitude_deg - 51.5).abs() < 1e-9);
    }

    #[test]
    fn solstice_point_declination_is_obliquity() {
        let (ra, dec) = ecliptic_to_equatorial(90.0, 0.0, OBLIQUITY_J2000_DEG);
        assert!((ra - 90.0).abs() < 1e-9);
        assert!((dec - OBLIQUITY_J2000_DEG).abs() < 1e-9);
    }

    #[test]
    fn equinox_point_is_origin() {
        let (ra, dec) = ecliptic_to_equatorial(0.0, 0.0, OBLIQUITY_J2000_DEG);
        assert!(ra.abs() < 1e-9 || (ra - 360.0).abs() < 1e-9);
        assert!(dec.abs() < 1e-9);
    }
}
