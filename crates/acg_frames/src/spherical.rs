//! Spherical-Earth geodesics: forward problem, distance and bearing.
//!
//! All angles in degrees, distances in km. Latitude north positive,
//! longitude east positive, bearings clockwise from north.

use crate::angle::{normalize_360, normalize_lon_180};

/// Mean Earth radius in km (IUGG).
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

/// Point reached by travelling `distance_km` from (`lat_deg`, `lon_deg`)
/// along the great circle with initial bearing `bearing_deg`.
///
/// ```text
/// δ    = distance / radius
/// lat' = asin(sin lat·cos δ + cos lat·sin δ·cos az)
/// lon' = lon + atan2(sin az·sin δ·cos lat, cos δ − sin lat·sin lat')
/// ```
///
/// Returns `(lat, lon)` with the longitude normalized to [-180, 180).
/// Zero distance returns the start point exactly.
pub fn destination_point(
    lat_deg: f64,
    lon_deg: f64,
    bearing_deg: f64,
    distance_km: f64,
    radius_km: f64,
) -> (f64, f64) {
    if distance_km == 0.0 {
        return (lat_deg, normalize_lon_180(lon_deg));
    }
    let lat = lat_deg.to_radians();
    let az = bearing_deg.to_radians();
    let delta = distance_km / radius_km;

    let lat2 = (lat.sin() * delta.cos() + lat.cos() * delta.sin() * az.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let dlon = f64::atan2(
        az.sin() * delta.sin() * lat.cos(),
        delta.cos() - lat.sin() * lat2.sin(),
    );
    (lat2.to_degrees(), normalize_lon_180(lon_deg + dlon.to_degrees()))
}

/// Central angle between two points (haversine), degrees in [0, 180].
pub fn great_circle_distance_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let p1 = lat1.to_radians();
    let p2 = lat2.to_radians();
    let dp = (lat2 - lat1).to_radians();
    let dl = (lon2 - lon1).to_radians();

    let a = (dp / 2.0).sin().powi(2) + p1.cos() * p2.cos() * (dl / 2.0).sin().powi(2);
    (2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt())).to_degrees()
}

/// Great-circle distance in km on a sphere of the given radius.
pub fn great_circle_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius_km: f64) -> f64 {
    great_circle_distance_deg(lat1, lon1, lat2, lon2).to_radians() * radius_km
}

/// Initial bearing from point 1 to point 2, degrees in [0, 360).
pub fn initial_bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let p1 = lat1.to_radians();
    let p2 = lat2.to_radians();
    let dl = (lon2 - lon1).to_radians();

    let y = dl.sin() * p2.cos();
    let x = p1.cos() * p2.sin() - p1.sin() * p2.cos() * dl.cos();
    normalize_360(y.atan2(x).to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f64 = EARTH_MEAN_RADIUS_KM;

    #[test]
    fn zero_distance_is_identity() {
        let (lat, lon) = destination_point(35.6895, 139.6917, 77.0, 0.0, R);
        assert_eq!(lat, 35.6895);
        assert_eq!(lon, 139.6917);
    }

    #[test]
    fn due_north_along_meridian() {
        let arc_10 = 10.0_f64.to_radians() * R;
        let (lat, lon) = destination_point(0.0, 20.0, 0.0, arc_10, R);
        assert!((lat - 10.0).abs() < 1e-9);
        assert!((lon - 20.0).abs() < 1e-9);
    }

    #[test]
    fn due_east_on_equator_wraps_longitude() {
        let arc_20 = 20.0_f64.to_radians() * R;
        let (lat, lon) = destination_point(0.0, 170.0, 90.0, arc_20, R);
        assert!(lat.abs() < 1e-9);
        assert!((lon + 170.0).abs() < 1e-9, "lon = {lon}");
    }

    #[test]
    fn half_circumference_reaches_antipode_latitude() {
        let half = std::f64::consts::PI * R;
        let (lat, _) = destination_point(40.0, -74.0, 45.0, half, R);
        assert!((lat + 40.0).abs() < 1e-6, "lat = {lat}");
    }

    #[test]
    fn distance_new_york_los_angeles() {
        let d = great_circle_distance_km(40.7128, -74.0060, 34.0522, -118.2437, R);
        assert!((d - 3936.0).abs() < 10.0, "d = {d}");
    }

    #[test]
    fn forward_then_inverse_agree() {
        let (lat, lon) = destination_point(51.5074, -0.1278, 123.0, 2500.0, R);
        let d = great_circle_distance_km(51.5074, -0.1278, lat, lon, R);
        let b = initial_bearing_deg(51.5074, -0.1278, lat, lon);
        assert!((d - 2500.0).abs() < 1e-6);
        assert!((b - 123.0).abs() < 1e-6);
    }

    #[test]
    fn bearing_cardinals() {
        assert!(initial_bearing_deg(0.0, 0.0, 10.0, 0.0).abs() < 1e-9);
        assert!((initial_bearing_deg(0.0, 0.0, 0.0, 10.0) - 90.0).abs() < 1e-9);
        assert!((initial_bearing_deg(0.0, 0.0, -10.0, 0.0) - 180.0).abs() < 1e-9);
        assert!((initial_bearing_deg(0.0, 0.0, 0.0, -10.0) - 270.0).abs() < 1e-9);
    }
}
