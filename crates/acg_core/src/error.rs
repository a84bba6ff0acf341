use std::path::PathBuf;

use acg_config::ConfigError;
use acg_lines::LineError;
use acg_time::TimeError;
use thiserror::Error;

use crate::body::Body;

/// Failures reported by a [`CelestialFrameProvider`](crate::CelestialFrameProvider).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("no coordinates available for {0}")]
    Unavailable(Body),
    #[error("provider backend failed: {0}")]
    Backend(String),
    #[error("provider returned invalid coordinates: {0}")]
    InvalidCoordinates(#[from] LineError),
    #[error("cannot read positions {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed positions: {0}")]
    Parse(String),
}

/// Core engine errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("provider failed for {body}: {source}")]
    Provider {
        body: Body,
        #[source]
        source: ProviderError,
    },
    #[error(transparent)]
    Line(#[from] LineError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Time(#[from] TimeError),
}
