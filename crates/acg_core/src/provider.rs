//! The seam to whatever computes body coordinates.
//!
//! The engine never computes ephemerides itself. It asks a
//! [`CelestialFrameProvider`] for a body's equatorial position and, in
//! local-space mode, for its apparent horizon position from an observer.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use acg_frames::{
    HorizontalCoords, OBLIQUITY_J2000_DEG, ecliptic_to_equatorial, equatorial_to_horizontal,
};
use acg_lines::{Equatorial, ObserverLocation};
use acg_time::{SiderealResolver, UtcInstant};
use serde::Deserialize;

use crate::body::{Body, UnknownBody};
use crate::error::ProviderError;

/// Source of body coordinates.
///
/// Implementations must be deterministic: the same `(instant, body)`
/// always yields the same answer, which is what makes memoization safe.
pub trait CelestialFrameProvider: Send + Sync {
    /// Geocentric right ascension and declination.
    fn position(&self, instant: UtcInstant, body: Body) -> Result<Equatorial, ProviderError>;

    /// Azimuth and altitude as seen by `observer`.
    fn apparent(
        &self,
        instant: UtcInstant,
        body: Body,
        observer: ObserverLocation,
    ) -> Result<HorizontalCoords, ProviderError>;
}

/// One body's entry in a positions file: equatorial, or ecliptic of
/// J2000 converted with the mean obliquity.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum RawPosition {
    Equatorial { ra_deg: f64, dec_deg: f64 },
    Ecliptic { lon_deg: f64, lat_deg: f64 },
}

impl RawPosition {
    fn to_equatorial(self) -> Result<Equatorial, ProviderError> {
        let (ra_deg, dec_deg) = match self {
            Self::Equatorial { ra_deg, dec_deg } => (ra_deg, dec_deg),
            Self::Ecliptic { lon_deg, lat_deg } => {
                ecliptic_to_equatorial(lon_deg, lat_deg, OBLIQUITY_J2000_DEG)
            }
        };
        Ok(Equatorial::new(ra_deg, dec_deg)?)
    }
}

/// Provider with one fixed position per body, whatever the instant.
///
/// Apparent positions are derived from the stored RA/Dec and the local
/// sidereal angle of the instant at the observer.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    positions: HashMap<Body, Equatorial>,
    sidereal: SiderealResolver,
}

impl StaticProvider {
    pub fn new(sidereal: SiderealResolver) -> Self {
        Self {
            positions: HashMap::new(),
            sidereal,
        }
    }

    pub fn with_position(mut self, body: Body, position: Equatorial) -> Self {
        self.positions.insert(body, position);
        self
    }

    pub fn insert(&mut self, body: Body, position: Equatorial) {
        self.positions.insert(body, position);
    }

    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.positions.keys().copied()
    }

    /// Parse `{"sun": {"ra_deg": .., "dec_deg": ..}, ...}`.
    ///
    /// An entry may give `lon_deg`/`lat_deg` (ecliptic) instead.
    pub fn from_json_str(text: &str, sidereal: SiderealResolver) -> Result<Self, ProviderError> {
        let raw: BTreeMap<String, RawPosition> =
            serde_json::from_str(text).map_err(|e| ProviderError::Parse(e.to_string()))?;
        let mut provider = Self::new(sidereal);
        for (key, coords) in raw {
            let body: Body = key
                .parse()
                .map_err(|e: UnknownBody| ProviderError::Parse(e.to_string()))?;
            provider.insert(body, coords.to_equatorial()?);
        }
        Ok(provider)
    }

    pub fn load(path: impl AsRef<Path>, sidereal: SiderealResolver) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ProviderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, sidereal)
    }
}

impl CelestialFrameProvider for StaticProvider {
    fn position(&self, _instant: UtcInstant, body: Body) -> Result<Equatorial, ProviderError> {
        self.positions
            .get(&body)
            .copied()
            .ok_or(ProviderError::Unavailable(body))
    }

    fn apparent(
        &self,
        instant: UtcInstant,
        body: Body,
        observer: ObserverLocation,
    ) -> Result<HorizontalCoords, ProviderError> {
        let eq = self.position(instant, body)?;
        let lst = self.sidereal.local_deg(instant, observer.longitude_deg());
        Ok(equatorial_to_horizontal(
            eq.ra_deg,
            eq.dec_deg,
            lst,
            observer.latitude_deg(),
        ))
    }
}
