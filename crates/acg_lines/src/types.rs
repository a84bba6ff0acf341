//! Geometry types produced and consumed by the projectors.

use std::fmt::{Display, Formatter};

use acg_frames::{normalize_360, normalize_lon_180};
use serde::{Deserialize, Serialize};

use crate::error::LineError;

/// A point on the globe. Latitude north positive, longitude east positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPoint {
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}

/// Fixed observer used by the local-space projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObserverLocation {
    latitude_deg: f64,
    longitude_deg: f64,
}

impl ObserverLocation {
    /// Validates |latitude| ≤ 90 and normalizes longitude into [-180, 180).
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, LineError> {
        if !latitude_deg.is_finite() || !longitude_deg.is_finite() {
            return Err(LineError::NonFinite("observer location"));
        }
        if latitude_deg.abs() > 90.0 {
            return Err(LineError::InvalidLatitude(latitude_deg));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg: normalize_lon_180(longitude_deg),
        })
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_deg
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude_deg, self.longitude_deg)
    }
}

/// Equatorial coordinates of one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Equatorial {
    /// Right ascension in degrees, range [0, 360).
    pub ra_deg: f64,
    /// Declination in degrees, range [-90, 90].
    pub dec_deg: f64,
}

impl Equatorial {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Result<Self, LineError> {
        if !ra_deg.is_finite() || !dec_deg.is_finite() {
            return Err(LineError::NonFinite("equatorial coordinates"));
        }
        if dec_deg.abs() > 90.0 {
            return Err(LineError::InvalidDeclination(dec_deg));
        }
        Ok(Self {
            ra_deg: normalize_360(ra_deg),
            dec_deg,
        })
    }
}

/// The four angles a body can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Angle {
    /// Upper culmination.
    #[serde(rename = "MC")]
    Mc,
    /// Lower culmination.
    #[serde(rename = "IC")]
    Ic,
    /// Rising.
    #[serde(rename = "AC")]
    Ac,
    /// Setting.
    #[serde(rename = "DC")]
    Dc,
}

pub const ALL_ANGLES: [Angle; 4] = [Angle::Mc, Angle::Ic, Angle::Ac, Angle::Dc];

impl Angle {
    pub const fn is_meridian(self) -> bool {
        matches!(self, Self::Mc | Self::Ic)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mc => "MC",
            Self::Ic => "IC",
            Self::Ac => "AC",
            Self::Dc => "DC",
        }
    }
}

impl Display for Angle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A culmination line: every point on one meridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeridianLine {
    pub angle: Angle,
    /// Longitude in [-180, 180).
    pub longitude_deg: f64,
}

/// A horizon curve sampled on a latitude grid.
///
/// Samples are strictly ascending in latitude. A latitude is missing when
/// the body does not cross the horizon there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveLine {
    pub angle: Angle,
    pub samples: Vec<GeoPoint>,
}

impl CurveLine {
    /// Inclusive latitude span covered by the samples.
    pub fn latitude_range(&self) -> Option<(f64, f64)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(lo), Some(hi)) => Some((lo.lat_deg, hi.lat_deg)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// All four angular lines for one body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct AngularLines {
    pub mc: MeridianLine,
    pub ic: MeridianLine,
    pub ac: CurveLine,
    pub dc: CurveLine,
}

impl AngularLines {
    pub fn meridian(&self, angle: Angle) -> Option<&MeridianLine> {
        match angle {
            Angle::Mc => Some(&self.mc),
            Angle::Ic => Some(&self.ic),
            Angle::Ac | Angle::Dc => None,
        }
    }

    pub fn curve(&self, angle: Angle) -> Option<&CurveLine> {
        match angle {
            Angle::Ac => Some(&self.ac),
            Angle::Dc => Some(&self.dc),
            Angle::Mc | Angle::Ic => None,
        }
    }
}

/// A great-circle ray leaving an observer along a body's azimuth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalSpaceLine {
    pub origin: ObserverLocation,
    pub azimuth_deg: f64,
    pub altitude_deg: f64,
    /// Starts at the origin and moves outward.
    pub points: Vec<GeoPoint>,
}

/// Named gazetteer entry checked against projected lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub name: String,
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl ReferencePoint {
    pub fn new(name: impl Into<String>, lat_deg: f64, lon_deg: f64) -> Result<Self, LineError> {
        let point = Self {
            name: name.into(),
            lat_deg,
            lon_deg,
        };
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> Result<(), LineError> {
        if !self.lat_deg.is_finite() || !self.lon_deg.is_finite() {
            return Err(LineError::NonFinite("reference point"));
        }
        if self.lat_deg.abs() > 90.0 {
            return Err(LineError::InvalidLatitude(self.lat_deg));
        }
        Ok(())
    }
}

/// Evenly spaced latitudes used to sample the horizon curves.
///
/// The poles are never part of a grid: tan(φ) is singular there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatitudeGrid {
    min_deg: f64,
    max_deg: f64,
    count: usize,
}

impl Default for LatitudeGrid {
    fn default() -> Self {
        Self {
            min_deg: -85.0,
            max_deg: 85.0,
            count: 150,
        }
    }
}

impl LatitudeGrid {
    pub fn new(min_deg: f64, max_deg: f64, count: usize) -> Result<Self, LineError> {
        if !min_deg.is_finite() || !max_deg.is_finite() {
            return Err(LineError::NonFinite("latitude grid bounds"));
        }
        if min_deg.abs() >= 90.0 || max_deg.abs() >= 90.0 {
            return Err(LineError::InvalidGrid("bounds must lie strictly inside (-90, 90)"));
        }
        if min_deg >= max_deg {
            return Err(LineError::InvalidGrid("min must be below max"));
        }
        if count < 2 {
            return Err(LineError::InvalidGrid("at least two samples required"));
        }
        Ok(Self {
            min_deg,
            max_deg,
            count,
        })
    }

    pub fn min_deg(&self) -> f64 {
        self.min_deg
    }

    pub fn max_deg(&self) -> f64 {
        self.max_deg
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Latitude of sample `i`; the last sample is exactly `max_deg`.
    pub fn latitude(&self, i: usize) -> f64 {
        if i + 1 >= self.count {
            return self.max_deg;
        }
        let step = (self.max_deg - self.min_deg) / (self.count - 1) as f64;
        self.min_deg + step * i as f64
    }

    pub fn latitudes(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(|i| self.latitude(i))
    }
}
