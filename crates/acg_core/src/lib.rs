//! Projection engine and provider seam.
//!
//! [`Engine`] takes a UTC instant and a body selection, asks a
//! [`CelestialFrameProvider`] for coordinates (memoized per request and
//! optionally for the process lifetime) and runs one of two projection
//! modes:
//!
//! - angular: MC/IC meridians, AC/DC horizon curves and the gazetteer
//!   places near each of them
//! - local space: great-circle rays from an observer toward each body
//!
//! Per-body projection runs on the rayon pool; results are keyed by
//! [`Body`] so completion order never shows in a report.

pub mod body;
pub mod cache;
pub mod engine;
pub mod error;
pub mod presentation;
pub mod provider;

pub use body::{Body, UnknownBody};
pub use cache::PositionCache;
pub use engine::{
    AngularReport, AngularRequest, Engine, EngineConfig, LocalSpaceReport, LocalSpaceRequest,
    QueryStats,
};
pub use error::{EngineError, ProviderError};
pub use presentation::{BodyLayer, RayLayer, local_space_layers, map_layers};
pub use provider::{CelestialFrameProvider, StaticProvider};
