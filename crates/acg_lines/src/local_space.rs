//! Local-space lines: the great circle leaving an observer along the
//! azimuth at which a body stands in the observer's sky.

use acg_frames::{EARTH_MEAN_RADIUS_KM, HorizontalCoords, destination_point};
use serde::{Deserialize, Serialize};

use crate::error::LineError;
use crate::types::{GeoPoint, LocalSpaceLine, ObserverLocation};

/// Sampling of a local-space ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSpaceConfig {
    /// Number of points including the observer itself.
    pub point_count: usize,
    /// Distance of the last point from the observer, km.
    pub max_distance_km: f64,
    pub earth_radius_km: f64,
}

impl Default for LocalSpaceConfig {
    fn default() -> Self {
        Self {
            point_count: 100,
            max_distance_km: 20_000.0,
            earth_radius_km: EARTH_MEAN_RADIUS_KM,
        }
    }
}

impl LocalSpaceConfig {
    pub fn validate(&self) -> Result<(), LineError> {
        if self.point_count < 2 {
            return Err(LineError::InvalidLocalSpace("point_count must be at least 2"));
        }
        if !self.earth_radius_km.is_finite() || self.earth_radius_km <= 0.0 {
            return Err(LineError::InvalidLocalSpace("earth_radius_km must be positive"));
        }
        if !self.max_distance_km.is_finite() || self.max_distance_km <= 0.0 {
            return Err(LineError::InvalidLocalSpace("max_distance_km must be positive"));
        }
        if self.max_distance_km > std::f64::consts::PI * self.earth_radius_km {
            return Err(LineError::InvalidLocalSpace(
                "max_distance_km exceeds half the circumference",
            ));
        }
        Ok(())
    }

    /// Distance of sample `i` from the observer, km.
    fn distance_km(&self, i: usize) -> f64 {
        self.max_distance_km * i as f64 / (self.point_count - 1) as f64
    }
}

/// Projects constant-bearing rays from a fixed observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalSpaceProjector {
    config: LocalSpaceConfig,
}

impl Default for LocalSpaceProjector {
    fn default() -> Self {
        Self {
            config: LocalSpaceConfig::default(),
        }
    }
}

impl LocalSpaceProjector {
    pub fn new(config: LocalSpaceConfig) -> Result<Self, LineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LocalSpaceConfig {
        &self.config
    }

    /// Ray from `observer` along the body's azimuth.
    ///
    /// The first point is the observer; distances grow evenly up to
    /// `max_distance_km`. Longitudes are normalized to [-180, 180).
    pub fn project(
        &self,
        observer: ObserverLocation,
        horizontal: HorizontalCoords,
    ) -> Result<LocalSpaceLine, LineError> {
        if !horizontal.azimuth_deg.is_finite() || !horizontal.altitude_deg.is_finite() {
            return Err(LineError::NonFinite("horizontal coordinates"));
        }
        let points = (0..self.config.point_count)
            .map(|i| {
                let (lat, lon) = destination_point(
                    observer.latitude_deg(),
                    observer.longitude_deg(),
                    horizontal.azimuth_deg,
                    self.config.distance_km(i),
                    self.config.earth_radius_km,
                );
                GeoPoint::new(lat, lon)
            })
            .collect();

        Ok(LocalSpaceLine {
            origin: observer,
            azimuth_deg: horizontal.azimuth_deg,
            altitude_deg: horizontal.altitude_deg,
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acg_frames::{great_circle_distance_deg, great_circle_distance_km, initial_bearing_deg};

    fn hz(azimuth_deg: f64) -> HorizontalCoords {
        HorizontalCoords {
            azimuth_deg,
            altitude_deg: 12.5,
        }
    }

    #[test]
    fn first_point_is_observer() {
        let tokyo = ObserverLocation::new(35.6895, 139.6917).unwrap();
        let line = LocalSpaceProjector::default().project(tokyo, hz(63.0)).unwrap();
        assert_eq!(line.points.len(), 100);
        assert_eq!(line.points[0], tokyo.point());
        assert_eq!(line.altitude_deg, 12.5);
    }

    #[test]
    fn distance_from_observer_strictly_increases() {
        let ny = ObserverLocation::new(40.7128, -74.0060).unwrap();
        for az in [0.0, 45.0, 90.0, 181.0, 300.0] {
            let line = LocalSpaceProjector::default().project(ny, hz(az)).unwrap();
            let d: Vec<f64> = line
                .points
                .iter()
                .map(|p| great_circle_distance_deg(ny.latitude_deg(), ny.longitude_deg(), p.lat_deg, p.lon_deg))
                .collect();
            assert!(d.windows(2).all(|w| w[1] > w[0]), "azimuth {az}");
        }
    }

    #[test]
    fn ray_leaves_along_azimuth_and_ends_at_max_distance() {
        let london = ObserverLocation::new(51.5074, -0.1278).unwrap();
        let line = LocalSpaceProjector::default().project(london, hz(118.0)).unwrap();
        let p1 = line.points[1];
        let bearing = initial_bearing_deg(london.latitude_deg(), london.longitude_deg(), p1.lat_deg, p1.lon_deg);
        assert!((bearing - 118.0).abs() < 1e-6, "bearing {bearing}");
        let last = line.points[99];
        let d = great_circle_distance_km(
            london.latitude_deg(),
            london.longitude_deg(),
            last.lat_deg,
            last.lon_deg,
            EARTH_MEAN_RADIUS_KM,
        );
        assert!((d - 20_000.0).abs() < 1e-3, "distance {d}");
    }

    #[test]
    fn ray_crossing_date_line_stays_normalized() {
        let honolulu = ObserverLocation::new(21.3069, -157.8583).unwrap();
        let line = LocalSpaceProjector::default().project(honolulu, hz(270.0)).unwrap();
        assert!(line.points.iter().all(|p| (-180.0..180.0).contains(&p.lon_deg)));
        assert!(line.points.windows(2).any(|w| (w[1].lon_deg - w[0].lon_deg).abs() > 180.0));
    }

    #[test]
    fn due_north_follows_meridian_over_pole() {
        let obs = ObserverLocation::new(0.0, 10.0).unwrap();
        let cfg = LocalSpaceConfig {
            point_count: 3,
            max_distance_km: std::f64::consts::PI * EARTH_MEAN_RADIUS_KM,
            earth_radius_km: EARTH_MEAN_RADIUS_KM,
        };
        let line = LocalSpaceProjector::new(cfg).unwrap().project(obs, hz(0.0)).unwrap();
        assert!((line.points[1].lat_deg - 90.0).abs() < 1e-6);
        assert!(line.points[2].lat_deg.abs() < 1e-6);
        assert!((line.points[2].lon_deg + 170.0).abs() < 1e-6);
    }

    #[test]
    fn config_validation() {
        let bad = LocalSpaceConfig {
            point_count: 1,
            ..LocalSpaceConfig::default()
        };
        assert!(LocalSpaceProjector::new(bad).is_err());
        let too_far = LocalSpaceConfig {
            max_distance_km: 25_000.0,
            ..LocalSpaceConfig::default()
        };
        assert!(matches!(
            LocalSpaceProjector::new(too_far),
            Err(LineError::InvalidLocalSpace(_))
        ));
    }

    #[test]
    fn rejects_non_finite_azimuth() {
        let obs = ObserverLocation::new(0.0, 0.0).unwrap();
        assert!(LocalSpaceProjector::default().project(obs, hz(f64::NAN)).is_err());
    }
}
