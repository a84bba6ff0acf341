//! MC/IC meridians and AC/DC horizon curves.
//!
//! A body culminates where the local sidereal angle equals its right
//! ascension, so the MC meridian sits at `RA − θ` for Greenwich sidereal
//! angle θ and the IC on the opposite meridian.
//!
//! On the horizon the hour angle H satisfies `cos H = −tan δ · tan φ`.
//! H is measured westward from the meridian: a rising body has local
//! hour angle −H, so `LST = RA − H` and the AC curve sits at
//! `RA − H − θ`; the setting body (hour angle +H) gives the DC curve at
//! `RA + H − θ`. When |tan δ · tan φ| > 1 the body is circumpolar or
//! never rises at φ and no sample exists there.
//!
//! Sources: Meeus, "Astronomical Algorithms" (2nd ed), Chapter 15;
//! Montenbruck & Pfleger, "Astronomy on the Personal Computer".

use acg_frames::normalize_lon_180;

use crate::error::LineError;
use crate::types::{Angle, AngularLines, CurveLine, Equatorial, GeoPoint, LatitudeGrid, MeridianLine};

/// Floating overshoot of |cos H| beyond 1 that is still treated as a
/// horizon crossing (clamped to the boundary).
const HORIZON_CLAMP_EPS: f64 = 1e-12;

/// MC and IC longitudes for a body at right ascension `ra_deg` under
/// Greenwich sidereal angle `sidereal_deg`.
///
/// Returns `(mc, ic)`, both in [-180, 180) and exactly 180° apart.
pub fn meridian_longitudes(ra_deg: f64, sidereal_deg: f64) -> (f64, f64) {
    let mc = normalize_lon_180(ra_deg - sidereal_deg);
    let ic = if mc < 0.0 { mc + 180.0 } else { mc - 180.0 };
    (mc, ic)
}

/// Semi-diurnal arc H (degrees, in [0, 180]) at latitude `lat_deg`, or
/// `None` when the body does not cross the horizon there.
pub fn horizon_hour_angle_deg(dec_deg: f64, lat_deg: f64) -> Option<f64> {
    let x = -dec_deg.to_radians().tan() * lat_deg.to_radians().tan();
    if !x.is_finite() || x.abs() > 1.0 + HORIZON_CLAMP_EPS {
        return None;
    }
    Some(x.clamp(-1.0, 1.0).acos().to_degrees())
}

/// Whether a body at declination `dec_deg` rises and sets at `lat_deg`.
pub fn horizon_crossing_exists(dec_deg: f64, lat_deg: f64) -> bool {
    horizon_hour_angle_deg(dec_deg, lat_deg).is_some()
}

/// |φ| beyond which a body at `dec_deg` never crosses the horizon.
///
/// `φ_b = atan(1 / tan|δ|) = 90 − |δ|`; 90 for a body on the equator.
pub fn horizon_boundary_latitude_deg(dec_deg: f64) -> f64 {
    90.0 - dec_deg.abs()
}

/// Projects one body's equatorial position onto its four angular lines.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AngularLineProjector {
    grid: LatitudeGrid,
}

impl AngularLineProjector {
    pub fn new(grid: LatitudeGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &LatitudeGrid {
        &self.grid
    }

    /// MC/IC longitudes and AC/DC curves for `eq` at sidereal angle
    /// `sidereal_deg` (degrees, any range).
    pub fn project(&self, eq: Equatorial, sidereal_deg: f64) -> Result<AngularLines, LineError> {
        if !sidereal_deg.is_finite() {
            return Err(LineError::NonFinite("sidereal angle"));
        }
        let (mc, ic) = meridian_longitudes(eq.ra_deg, sidereal_deg);

        let mut ac = Vec::with_capacity(self.grid.count());
        let mut dc = Vec::with_capacity(self.grid.count());
        for lat in self.grid.latitudes() {
            let Some(h) = horizon_hour_angle_deg(eq.dec_deg, lat) else {
                continue;
            };
            ac.push(GeoPoint::new(
                lat,
                normalize_lon_180(eq.ra_deg - h - sidereal_deg),
            ));
            dc.push(GeoPoint::new(
                lat,
                normalize_lon_180(eq.ra_deg + h - sidereal_deg),
            ));
        }

        Ok(AngularLines {
            mc: MeridianLine {
                angle: Angle::Mc,
                longitude_deg: mc,
            },
            ic: MeridianLine {
                angle: Angle::Ic,
                longitude_deg: ic,
            },
            ac: CurveLine {
                angle: Angle::Ac,
                samples: ac,
            },
            dc: CurveLine {
                angle: Angle::Dc,
                samples: dc,
            },
        })
    }
}
