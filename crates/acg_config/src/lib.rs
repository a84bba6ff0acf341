//! Immutable configuration injected into the projection engine.
//!
//! An [`AppConfig`] bundles the body metadata table, the gazetteer of
//! named places and numeric settings. [`AppConfig::default`] carries the
//! built-in tables; [`AppConfig::load`] reads a JSON file in which every
//! field is optional and falls back to those defaults.

pub mod bodies;
pub mod error;
pub mod gazetteer;
pub mod settings;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use acg_lines::ReferencePoint;
pub use bodies::{BodyInfo, BodyTable};
pub use error::ConfigError;
pub use gazetteer::{Gazetteer, GazetteerEntry, Region};
pub use settings::{GridSettings, Settings};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bodies: BodyTable,
    pub gazetteer: Gazetteer,
    pub settings: Settings,
}

impl AppConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bodies.validate()?;
        self.gazetteer.validate()?;
        self.settings.validate()
    }

    /// Reference points the proximity finder searches, in gazetteer order.
    pub fn proximity_points(&self) -> Vec<ReferencePoint> {
        self.gazetteer
            .filter_regions(&self.settings.proximity_regions)
            .reference_points()
    }
}
