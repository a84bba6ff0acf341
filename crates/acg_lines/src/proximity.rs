//! Which reference points lie near which lines.
//!
//! Distances are measured in longitude only, the short way round the
//! globe. Meridians are compared directly; horizon curves are first
//! interpolated at the point's latitude.

use std::collections::BTreeMap;

use acg_frames::{circular_distance_deg, normalize_lon_180, signed_delta_deg};
use serde::Serialize;

use crate::error::LineError;
use crate::types::{ALL_ANGLES, Angle, AngularLines, CurveLine, MeridianLine, ReferencePoint};

/// Longitude tolerance used when the caller does not choose one.
pub const DEFAULT_TOLERANCE_DEG: f64 = 5.0;

/// Matched reference-point names per key and angle.
///
/// Every key passed to [`find_in_bands`] is present with all four angles,
/// possibly with empty name lists. Names keep gazetteer order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProximityResult<K: Ord> {
    matches: BTreeMap<K, BTreeMap<Angle, Vec<String>>>,
}

impl<K: Ord> ProximityResult<K> {
    pub fn get(&self, key: &K, angle: Angle) -> Option<&[String]> {
        self.matches
            .get(key)
            .and_then(|by_angle| by_angle.get(&angle))
            .map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.matches.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &BTreeMap<Angle, Vec<String>>)> {
        self.matches.iter()
    }

    /// True when no reference point matched any line.
    pub fn is_empty(&self) -> bool {
        self.matches
            .values()
            .all(|by_angle| by_angle.values().all(Vec::is_empty))
    }

    /// Total number of (key, angle, name) matches.
    pub fn match_count(&self) -> usize {
        self.matches
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }
}

fn validate_tolerance(tolerance_deg: f64) -> Result<(), LineError> {
    if !tolerance_deg.is_finite() || tolerance_deg < 0.0 {
        return Err(LineError::InvalidTolerance(tolerance_deg));
    }
    Ok(())
}

/// Whether `point` lies within `tolerance_deg` of a meridian line.
pub fn meridian_matches(line: &MeridianLine, point: &ReferencePoint, tolerance_deg: f64) -> bool {
    circular_distance_deg(point.lon_deg, line.longitude_deg) <= tolerance_deg
}

/// Longitude of `curve` at `lat_deg`, or `None` outside the sampled
/// latitude range.
///
/// Linear between neighbouring samples; the step between them is taken
/// the short way round, so a curve crossing ±180 interpolates through
/// the date line rather than across the whole map.
pub fn curve_longitude_at(curve: &CurveLine, lat_deg: f64) -> Option<f64> {
    let (min_lat, max_lat) = curve.latitude_range()?;
    if !(min_lat..=max_lat).contains(&lat_deg) {
        return None;
    }
    let samples = &curve.samples;
    let idx = samples.partition_point(|s| s.lat_deg < lat_deg);
    let hi = samples.get(idx)?;
    if hi.lat_deg == lat_deg || idx == 0 {
        return Some(hi.lon_deg);
    }
    let lo = &samples[idx - 1];
    let t = (lat_deg - lo.lat_deg) / (hi.lat_deg - lo.lat_deg);
    Some(normalize_lon_180(
        lo.lon_deg + t * signed_delta_deg(lo.lon_deg, hi.lon_deg),
    ))
}

/// Whether `point` lies within `tolerance_deg` of a horizon curve at its
/// own latitude.
pub fn curve_matches(curve: &CurveLine, point: &ReferencePoint, tolerance_deg: f64) -> bool {
    curve_longitude_at(curve, point.lat_deg)
        .is_some_and(|lon| circular_distance_deg(point.lon_deg, lon) <= tolerance_deg)
}

fn matches_angle(lines: &AngularLines, angle: Angle, point: &ReferencePoint, tol: f64) -> bool {
    match (lines.meridian(angle), lines.curve(angle)) {
        (Some(m), _) => meridian_matches(m, point, tol),
        (None, Some(c)) => curve_matches(c, point, tol),
        (None, None) => false,
    }
}

/// Match every reference point against every line of every key.
///
/// Fails only on an invalid tolerance; a point far from every line is
/// simply absent from the result.
pub fn find_in_bands<'a, K, I>(
    lines: I,
    gazetteer: &[ReferencePoint],
    tolerance_deg: f64,
) -> Result<ProximityResult<K>, LineError>
where
    K: Ord,
    I: IntoIterator<Item = (K, &'a AngularLines)>,
{
    validate_tolerance(tolerance_deg)?;

    let mut matches = BTreeMap::new();
    for (key, body_lines) in lines {
        let by_angle: BTreeMap<Angle, Vec<String>> = ALL_ANGLES
            .iter()
            .map(|&angle| {
                let names = gazetteer
                    .iter()
                    .filter(|p| matches_angle(body_lines, angle, p, tolerance_deg))
                    .map(|p| p.name.clone())
                    .collect();
                (angle, names)
            })
            .collect();
        matches.insert(key, by_angle);
    }
    Ok(ProximityResult { matches })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angular::AngularLineProjector;
    use crate::types::{Equatorial, GeoPoint};

    fn city(name: &str, lat: f64, lon: f64) -> ReferencePoint {
        ReferencePoint::new(name, lat, lon).unwrap()
    }

    fn meridian(lon: f64) -> MeridianLine {
        MeridianLine {
            angle: Angle::Mc,
            longitude_deg: lon,
        }
    }

    fn curve(samples: &[(f64, f64)]) -> CurveLine {
        CurveLine {
            angle: Angle::Ac,
            samples: samples
                .iter()
                .map(|&(lat, lon)| GeoPoint::new(lat, lon))
                .collect(),
        }
    }

    #[test]
    fn meridian_match_wraps_date_line() {
        let line = meridian(-175.0);
        assert!(meridian_matches(&line, &city("a", 0.0, 170.0), 15.0));
        assert!(!meridian_matches(&line, &city("a", 0.0, 170.0), 14.9));
        assert!(!meridian_matches(&line, &city("c", 0.0, 10.0), 15.0));
        assert!(meridian_matches(&meridian(179.0), &city("b", 0.0, -178.0), 5.0));
    }

    #[test]
    fn exact_longitude_matches_with_zero_tolerance() {
        let line = meridian(139.6917);
        assert!(meridian_matches(&line, &city("Tokyo", 35.6895, 139.6917), 0.0));
    }

    #[test]
    fn curve_interpolates_between_samples() {
        let c = curve(&[(0.0, 10.0), (10.0, 20.0), (20.0, 40.0)]);
        assert_eq!(curve_longitude_at(&c, 0.0), Some(10.0));
        assert_eq!(curve_longitude_at(&c, 20.0), Some(40.0));
        assert!((curve_longitude_at(&c, 5.0).unwrap() - 15.0).abs() < 1e-12);
        assert!((curve_longitude_at(&c, 15.0).unwrap() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn curve_outside_latitude_range_does_not_match() {
        let c = curve(&[(-30.0, 0.0), (30.0, 0.0)]);
        assert_eq!(curve_longitude_at(&c, 30.0001), None);
        assert_eq!(curve_longitude_at(&c, -45.0), None);
        assert!(!curve_matches(&c, &city("far north", 60.0, 0.0), 180.0));
        assert!(curve_matches(&c, &city("edge", 30.0, 0.0), 0.0));
    }

    #[test]
    fn empty_curve_never_matches() {
        let c = curve(&[]);
        assert_eq!(curve_longitude_at(&c, 0.0), None);
        assert!(!curve_matches(&c, &city("x", 0.0, 0.0), 10.0));
    }

    #[test]
    fn interpolation_crosses_date_line_the_short_way() {
        let c = curve(&[(0.0, 170.0), (10.0, -170.0)]);
        let mid = curve_longitude_at(&c, 5.0).unwrap();
        assert!(
            circular_distance_deg(mid, 180.0) < 1e-9,
            "interpolated {mid}, expected the date line"
        );
        assert!(curve_matches(&c, &city("fiji-ish", 5.0, 179.0), 2.0));
        assert!(!curve_matches(&c, &city("greenwich", 5.0, 0.0), 5.0));
    }

    #[test]
    fn find_in_bands_reports_every_key_and_angle() {
        let lines = AngularLineProjector::default()
            .project(Equatorial::new(100.0, 20.0).unwrap(), 40.0)
            .unwrap();
        let gazetteer = vec![
            city("on MC", 10.0, 60.0),
            city("near IC", -20.0, -118.0),
            city("nowhere", 0.0, 100.0),
        ];
        let result = find_in_bands([("sun", &lines), ("moon", &lines)], &gazetteer, 5.0).unwrap();

        let keys: Vec<&&str> = result.keys().collect();
        assert_eq!(keys, vec![&"moon", &"sun"]);
        assert_eq!(result.get(&"sun", Angle::Mc), Some(&["on MC".to_string()][..]));
        assert_eq!(result.get(&"sun", Angle::Ic), Some(&["near IC".to_string()][..]));
        for angle in ALL_ANGLES {
            let names = result.get(&"moon", angle).unwrap();
            assert!(!names.iter().any(|n| n == "nowhere"), "{angle}");
        }
        assert!(!result.is_empty());
    }

    #[test]
    fn names_keep_gazetteer_order() {
        let lines = AngularLineProjector::default()
            .project(Equatorial::new(0.0, 0.0).unwrap(), 0.0)
            .unwrap();
        let gazetteer = vec![city("b", 0.0, 1.0), city("a", 10.0, -1.0), city("c", -5.0, 0.5)];
        let result = find_in_bands([(1u8, &lines)], &gazetteer, 2.0).unwrap();
        assert_eq!(result.get(&1, Angle::Mc).unwrap(), ["b", "a", "c"]);
        assert_eq!(result.match_count(), 3);
    }

    #[test]
    fn no_matches_is_an_empty_result_not_an_error() {
        let lines = AngularLineProjector::default()
            .project(Equatorial::new(0.0, 0.0).unwrap(), 0.0)
            .unwrap();
        let result = find_in_bands([(0u8, &lines)], &[city("x", 0.0, 45.0)], 1.0).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.get(&0, Angle::Dc), Some(&[][..]));
    }

    #[test]
    fn rejects_invalid_tolerance() {
        let lines = AngularLineProjector::default()
            .project(Equatorial::new(0.0, 0.0).unwrap(), 0.0)
            .unwrap();
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                find_in_bands([(0u8, &lines)], &[], bad),
                Err(LineError::InvalidTolerance(_))
            ));
        }
    }
}
