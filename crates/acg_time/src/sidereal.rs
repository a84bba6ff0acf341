//! Earth Rotation Angle, Greenwich Mean Sidereal Time and the sidereal
//! resolver used by the line projectors.
//!
//! The low-level functions take UT1 Julian Dates. [`SiderealResolver`]
//! wraps them for [`UtcInstant`] input, applying a configured DUT1.
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15. Public domain.
//! - GMST polynomial: Capitaine et al. 2003, Table 2. Public domain.

use std::f64::consts::{PI, TAU};

use crate::error::TimeError;
use crate::instant::UtcInstant;
use crate::julian::J2000_JD;

/// Arcseconds to radians: 1″ = π / (180 × 3600).
const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// IERS keeps |UT1 - UTC| below this many seconds.
const MAX_DUT1_SECONDS: f64 = 0.9;

/// Earth Rotation Angle at a given UT1 Julian Date.
///
/// θ = 2π × (0.7790572732640 + 1.00273781191135448 × Du)
/// where Du = JD_UT1 − 2451545.0.
///
/// Returns radians in [0, 2π).
pub fn earth_rotation_angle_rad(jd_ut1: f64) -> f64 {
    let du = jd_ut1 - J2000_JD;
    // Split Du into whole days and fraction so the large integer part of
    // the rotation count cancels before multiplying by 2π.
    let frac_day = du.rem_euclid(1.0);
    let theta = TAU * (frac_day + 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * du);
    theta.rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time at a given UT1 Julian Date.
///
/// GMST = ERA + polynomial(T), where T = Julian centuries of UT1 from J2000.0.
///
/// Polynomial (arcseconds):
///   0.014506 + 4612.156534·T + 1.3915817·T² − 0.00000044·T³
///   − 0.000029956·T⁴ − 0.0000000368·T⁵
///
/// Returns radians in [0, 2π).
pub fn gmst_rad(jd_ut1: f64) -> f64 {
    let era = earth_rotation_angle_rad(jd_ut1);
    let t = (jd_ut1 - J2000_JD) / 36525.0;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t2
        - 0.00000044 * t3
        - 0.000029956 * t4
        - 0.0000000368 * t5;

    (era + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// GMST in degrees, range [0, 360).
pub fn gmst_deg(jd_ut1: f64) -> f64 {
    gmst_rad(jd_ut1).to_degrees().rem_euclid(360.0)
}

/// Local Sidereal Time from GMST and observer east longitude.
///
/// LST = GMST + longitude_east_rad, in [0, 2π).
pub fn local_sidereal_time_rad(gmst: f64, longitude_east_rad: f64) -> f64 {
    (gmst + longitude_east_rad).rem_euclid(TAU)
}

/// Local Sidereal Time in degrees, range [0, 360).
pub fn local_sidereal_time_deg(gmst_deg: f64, longitude_east_deg: f64) -> f64 {
    (gmst_deg + longitude_east_deg).rem_euclid(360.0)
}

/// Sidereal angle that puts a given ecliptic longitude on the meridian.
///
/// Inverts `MC = atan2(sin θ, cos θ·cos ε)`:
/// `θ = atan2(sin λ·cos ε, cos λ)`. The result is the RAMC in degrees,
/// range [0, 360). Used when only a chart's midheaven is known and no
/// instant is available.
pub fn sidereal_from_mc_longitude_deg(mc_ecliptic_lon_deg: f64, obliquity_deg: f64) -> f64 {
    let lambda = mc_ecliptic_lon_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    f64::atan2(lambda.sin() * eps.cos(), lambda.cos())
        .to_degrees()
        .rem_euclid(360.0)
}

/// Resolves the sidereal angle for UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SiderealResolver {
    dut1_seconds: f64,
}

impl SiderealResolver {
    /// Resolver applying DUT1 = UT1 − UTC (seconds) before evaluating GMST.
    pub fn new(dut1_seconds: f64) -> Result<Self, TimeError> {
        if !dut1_seconds.is_finite() {
            return Err(TimeError::NonFinite("dut1_seconds"));
        }
        if dut1_seconds.abs() > MAX_DUT1_SECONDS {
            return Err(TimeError::Dut1OutOfRange(dut1_seconds));
        }
        Ok(Self { dut1_seconds })
    }

    pub fn dut1_seconds(&self) -> f64 {
        self.dut1_seconds
    }

    /// Greenwich sidereal angle in degrees, range [0, 360).
    pub fn greenwich_deg(&self, instant: UtcInstant) -> f64 {
        gmst_deg(instant.jd_ut1(self.dut1_seconds))
    }

    /// Local sidereal angle for an east-positive longitude, range [0, 360).
    pub fn local_deg(&self, instant: UtcInstant, longitude_east_deg: f64) -> f64 {
        local_sidereal_time_deg(self.greenwich_deg(instant), longitude_east_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_at_j2000_noon() {
        // At J2000.0 (JD 2451545.0), ERA ≈ 280.46°
        let theta_deg = earth_rotation_angle_rad(J2000_JD).to_degrees();
        assert!(
            (theta_deg - 280.46).abs() < 0.1,
            "ERA at J2000 = {theta_deg}°, expected ~280.46°"
        );
    }

    #[test]
    fn gmst_j2000_midnight() {
        // 2000-Jan-01 0h UT1: GMST = 6h 39m 51.170s ≈ 99.968°
        let g = gmst_deg(2_451_544.5);
        assert!((g - 99.968).abs() < 0.01, "GMST = {g}°");
    }

    #[test]
    fn gmst_advances_about_one_degree_per_day() {
        let g1 = gmst_deg(2_451_545.0);
        let g2 = gmst_deg(2_451_546.0);
        let advance = (g2 - g1).rem_euclid(360.0);
        assert!((advance - 0.9856).abs() < 0.001, "advance = {advance}");
    }

    #[test]
    fn meeus_example_12a() {
        // 1987 April 10, 0h UT: GMST = 13h 10m 46.3668s = 197.693195°
        let g = gmst_deg(2_446_895.5);
        assert!((g - 197.693_195).abs() < 1e-3, "GMST = {g}°");
    }

    #[test]
    fn lst_east_offset_wraps() {
        assert!((local_sidereal_time_deg(350.0, 20.0) - 10.0).abs() < 1e-12);
        assert!((local_sidereal_time_deg(10.0, -20.0) - 350.0).abs() < 1e-12);
        let lst = local_sidereal_time_rad(1.0, PI / 2.0);
        assert!((lst - (1.0 + PI / 2.0)).abs() < 1e-15);
    }

    #[test]
    fn ranges() {
        for &jd in &[2_451_545.0, 2_451_544.5, 2_460_000.5, 2_440_000.5, 2_488_069.5] {
            let theta = earth_rotation_angle_rad(jd);
            assert!((0.0..TAU).contains(&theta), "ERA out of range: {theta}");
            let g = gmst_deg(jd);
            assert!((0.0..360.0).contains(&g), "GMST out of range: {g}");
        }
    }

    #[test]
    fn mc_inverse_round_trips_through_mc_formula() {
        let eps = 23.439_291_1_f64;
        for &theta_deg in &[0.0, 33.0, 90.0, 145.5, 180.0, 260.0, 300.0, 359.0] {
            let theta = f64::to_radians(theta_deg);
            let mc = f64::atan2(theta.sin(), theta.cos() * eps.to_radians().cos())
                .to_degrees()
                .rem_euclid(360.0);
            let back = sidereal_from_mc_longitude_deg(mc, eps);
            let diff = (back - theta_deg).rem_euclid(360.0);
            assert!(diff.min(360.0 - diff) < 1e-9, "θ={theta_deg} -> MC={mc} -> {back}");
        }
    }

    #[test]
    fn mc_at_cardinal_points_equals_ramc() {
        let eps = 23.44;
        assert!(sidereal_from_mc_longitude_deg(0.0, eps).abs() < 1e-12);
        assert!((sidereal_from_mc_longitude_deg(90.0, eps) - 90.0).abs() < 1e-9);
        assert!((sidereal_from_mc_longitude_deg(180.0, eps) - 180.0).abs() < 1e-9);
        assert!((sidereal_from_mc_longitude_deg(270.0, eps) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn resolver_rejects_bad_dut1() {
        assert!(matches!(
            SiderealResolver::new(1.5),
            Err(TimeError::Dut1OutOfRange(_))
        ));
        assert!(matches!(
            SiderealResolver::new(f64::INFINITY),
            Err(TimeError::NonFinite(_))
        ));
    }

    #[test]
    fn resolver_matches_gmst_at_j2000_midnight() {
        let t = UtcInstant::from_calendar(2000, 1, 1, 0, 0, 0.0).unwrap();
        let r = SiderealResolver::default();
        assert!((r.greenwich_deg(t) - gmst_deg(2_451_544.5)).abs() < 1e-6);
        assert!((r.local_deg(t, 139.69) - (gmst_deg(2_451_544.5) + 139.69)).abs() < 1e-6);
    }
}
