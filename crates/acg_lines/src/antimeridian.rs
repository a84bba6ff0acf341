//! Date-line handling for presentation.
//!
//! Polylines are broken wherever consecutive longitudes jump by more
//! than 180°, which can only happen when the line crossed ±180. Filled
//! bands (a ± tolerance ribbon around a line) are instead split into
//! separate closed polygons, one per side of the date line.
//!
//! Nothing here feeds back into the line data used for proximity.

use acg_frames::signed_delta_deg;
use serde::Serialize;

use crate::error::LineError;
use crate::types::{CurveLine, GeoPoint, LatitudeGrid, MeridianLine};

/// A longitude jump strictly larger than this marks a date-line crossing.
const WRAP_JUMP_DEG: f64 = 180.0;

/// Polygons narrower than this after clipping are dropped.
const MIN_POLYGON_WIDTH_DEG: f64 = 1e-9;

/// One vertex of a rendered path: a point or a gap marker.
///
/// Serializes as the point object or as `null` for a break.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathVertex {
    Point(GeoPoint),
    Break,
}

fn is_wrap(a: &GeoPoint, b: &GeoPoint) -> bool {
    (b.lon_deg - a.lon_deg).abs() > WRAP_JUMP_DEG
}

/// Split a polyline into runs that never jump across the date line.
///
/// A jump of exactly 180° is kept continuous.
pub fn split_at_antimeridian(points: &[GeoPoint]) -> Vec<Vec<GeoPoint>> {
    let mut runs = Vec::new();
    let mut current: Vec<GeoPoint> = Vec::new();
    for p in points {
        if current.last().is_some_and(|prev| is_wrap(prev, p)) {
            runs.push(std::mem::take(&mut current));
        }
        current.push(*p);
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// The same polyline as a flat vertex list with [`PathVertex::Break`]
/// inserted at every date-line jump.
pub fn with_breaks(points: &[GeoPoint]) -> Vec<PathVertex> {
    let mut out = Vec::with_capacity(points.len() + 2);
    for (i, p) in points.iter().enumerate() {
        if i > 0 && is_wrap(&points[i - 1], p) {
            out.push(PathVertex::Break);
        }
        out.push(PathVertex::Point(*p));
    }
    out
}

/// Two-point polyline for a meridian line across the grid's latitudes.
pub fn meridian_path(line: &MeridianLine, grid: &LatitudeGrid) -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(grid.min_deg(), line.longitude_deg),
        GeoPoint::new(grid.max_deg(), line.longitude_deg),
    ]
}

/// A closed ring (first vertex repeated last), longitudes in [-180, 180].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandPolygon {
    pub ring: Vec<GeoPoint>,
}

impl BandPolygon {
    /// Longitude extent `(west, east)` of the ring.
    pub fn lon_bounds(&self) -> (f64, f64) {
        self.ring.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.lon_deg), hi.max(p.lon_deg))
        })
    }
}

fn validate_band_tolerance(tolerance_deg: f64) -> Result<(), LineError> {
    if !tolerance_deg.is_finite() || !(0.0..180.0).contains(&tolerance_deg) {
        return Err(LineError::InvalidTolerance(tolerance_deg));
    }
    Ok(())
}

/// Band of ± `tolerance_deg` longitude around a meridian.
pub fn meridian_band(
    longitude_deg: f64,
    tolerance_deg: f64,
    min_lat_deg: f64,
    max_lat_deg: f64,
) -> Result<Vec<BandPolygon>, LineError> {
    validate_band_tolerance(tolerance_deg)?;
    let west = longitude_deg - tolerance_deg;
    let east = longitude_deg + tolerance_deg;
    let ring = [
        GeoPoint::new(min_lat_deg, west),
        GeoPoint::new(max_lat_deg, west),
        GeoPoint::new(max_lat_deg, east),
        GeoPoint::new(min_lat_deg, east),
    ];
    Ok(split_ring(&ring))
}

/// Band of ± `tolerance_deg` longitude around a horizon curve.
///
/// The ribbon runs up the western edge and back down the eastern edge.
/// Curves with fewer than two samples have no band.
pub fn curve_band(curve: &CurveLine, tolerance_deg: f64) -> Result<Vec<BandPolygon>, LineError> {
    validate_band_tolerance(tolerance_deg)?;
    if curve.samples.len() < 2 {
        return Ok(Vec::new());
    }
    let center = unwrap_longitudes(&curve.samples);
    let mut ring = Vec::with_capacity(center.len() * 2);
    ring.extend(
        center
            .iter()
            .map(|p| GeoPoint::new(p.lat_deg, p.lon_deg - tolerance_deg)),
    );
    ring.extend(
        center
            .iter()
            .rev()
            .map(|p| GeoPoint::new(p.lat_deg, p.lon_deg + tolerance_deg)),
    );
    Ok(split_ring(&ring))
}

/// Make longitudes continuous: each step is the short way round, so the
/// sequence may leave [-180, 180).
fn unwrap_longitudes(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let mut out: Vec<GeoPoint> = Vec::with_capacity(points.len());
    for p in points {
        let lon = match out.last() {
            Some(prev) => prev.lon_deg + signed_delta_deg(prev.lon_deg, p.lon_deg),
            None => p.lon_deg,
        };
        out.push(GeoPoint::new(p.lat_deg, lon));
    }
    out
}

/// Cut an unwrapped open ring into the pieces that fall in each 360°
/// window, shifting every piece back into [-180, 180].
fn split_ring(ring: &[GeoPoint]) -> Vec<BandPolygon> {
    let (lo, hi) = ring
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.lon_deg), hi.max(p.lon_deg))
        });

    let mut polygons = Vec::new();
    let first_window = ((lo + 180.0) / 360.0).floor() as i64;
    let last_window = ((hi + 180.0) / 360.0).floor() as i64;
    for window in first_window..=last_window {
        let shift = -360.0 * window as f64;
        let shifted: Vec<GeoPoint> = ring
            .iter()
            .map(|p| GeoPoint::new(p.lat_deg, p.lon_deg + shift))
            .collect();
        let clipped = clip_lon(&shifted, -180.0, |lon| lon >= -180.0);
        let mut clipped = clip_lon(&clipped, 180.0, |lon| lon <= 180.0);
        if clipped.len() < 3 {
            continue;
        }
        let (west, east) = clipped
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.lon_deg), hi.max(p.lon_deg))
            });
        if east - west < MIN_POLYGON_WIDTH_DEG {
            continue;
        }
        clipped.push(clipped[0]);
        polygons.push(BandPolygon { ring: clipped });
    }
    polygons
}

/// Sutherland–Hodgman clip of an open ring against one vertical edge.
fn clip_lon(ring: &[GeoPoint], edge_lon: f64, inside: impl Fn(f64) -> bool) -> Vec<GeoPoint> {
    let n = ring.len();
    let mut out = Vec::with_capacity(n + 2);
    for i in 0..n {
        let cur = ring[i];
        let prev = ring[(i + n - 1) % n];
        let cur_in = inside(cur.lon_deg);
        let prev_in = inside(prev.lon_deg);
        if cur_in != prev_in {
            let t = (edge_lon - prev.lon_deg) / (cur.lon_deg - prev.lon_deg);
            out.push(GeoPoint::new(
                prev.lat_deg + t * (cur.lat_deg - prev.lat_deg),
                edge_lon,
            ));
        }
        if cur_in {
            out.push(cur);
        }
    }
    out
}
