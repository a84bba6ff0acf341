//! Numeric knobs for the projection engine.

use acg_lines::{DEFAULT_TOLERANCE_DEG, LatitudeGrid, LineError, LocalSpaceConfig};
use acg_time::SiderealResolver;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gazetteer::Region;

/// Latitude sampling of the horizon curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub min_lat_deg: f64,
    pub max_lat_deg: f64,
    pub samples: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        let grid = LatitudeGrid::default();
        Self {
            min_lat_deg: grid.min_deg(),
            max_lat_deg: grid.max_deg(),
            samples: grid.count(),
        }
    }
}

impl GridSettings {
    pub fn to_grid(&self) -> Result<LatitudeGrid, LineError> {
        LatitudeGrid::new(self.min_lat_deg, self.max_lat_deg, self.samples)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default proximity tolerance in degrees of longitude.
    pub tolerance_deg: f64,
    pub grid: GridSettings,
    pub local_space: LocalSpaceConfig,
    /// UT1 − UTC in seconds.
    pub dut1_seconds: f64,
    /// Entries kept by the process-wide position cache; 0 disables it.
    pub cache_capacity: usize,
    /// Gazetteer regions searched by the proximity finder.
    pub proximity_regions: Vec<Region>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerance_deg: DEFAULT_TOLERANCE_DEG,
            grid: GridSettings::default(),
            local_space: LocalSpaceConfig::default(),
            dut1_seconds: 0.0,
            cache_capacity: 256,
            proximity_regions: vec![Region::World],
        }
    }
}

impl Settings {
    pub fn sidereal_resolver(&self) -> Result<SiderealResolver, ConfigError> {
        Ok(SiderealResolver::new(self.dut1_seconds)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance_deg.is_finite() || self.tolerance_deg < 0.0 {
            return Err(LineError::InvalidTolerance(self.tolerance_deg).into());
        }
        self.grid.to_grid()?;
        self.local_space.validate()?;
        self.sidereal_resolver()?;
        if self.proximity_regions.is_empty() {
            return Err(ConfigError::Invalid(
                "proximity_regions must name at least one region".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = Settings::default();
        s.validate().unwrap();
        assert_eq!(s.tolerance_deg, 5.0);
        assert_eq!(s.grid.to_grid().unwrap(), LatitudeGrid::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"tolerance_deg": 2.5, "grid": {"samples": 30}}"#).unwrap();
        assert_eq!(s.tolerance_deg, 2.5);
        assert_eq!(s.grid.samples, 30);
        assert_eq!(s.grid.min_lat_deg, -85.0);
        assert_eq!(s.local_space.point_count, 100);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let s = Settings {
            tolerance_deg: -1.0,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(ConfigError::Line(_))));

        let s = Settings {
            dut1_seconds: 2.0,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(ConfigError::Time(_))));

        let s = Settings {
            grid: GridSettings {
                min_lat_deg: -90.0,
                ..GridSettings::default()
            },
            ..Settings::default()
        };
        assert!(s.validate().is_err());

        let s = Settings {
            proximity_regions: Vec::new(),
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(ConfigError::Invalid(_))));
    }
}
