use std::path::PathBuf;

use acg_lines::LineError;
use acg_time::TimeError;
use thiserror::Error;

/// Errors from loading or validating an [`AppConfig`](crate::AppConfig).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Line(#[from] LineError),
    #[error(transparent)]
    Time(#[from] TimeError),
}
