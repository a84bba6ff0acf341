//! Celestial line projection and geo-proximity.
//!
//! Given a body's equatorial coordinates and the sidereal angle of an
//! instant, this crate computes where on Earth the body sits on one of
//! the four angles:
//!
//! - [`angular`]: MC/IC meridians and AC/DC horizon curves
//! - [`local_space`]: constant-bearing great-circle ray from an observer
//! - [`antimeridian`]: date-line safe polylines and band polygons for
//!   presentation
//! - [`proximity`]: which reference points lie within a longitude
//!   tolerance of each line
//!
//! Every function here is pure; nothing is cached or shared.

pub mod angular;
pub mod antimeridian;
pub mod error;
pub mod local_space;
pub mod proximity;
pub mod types;

pub use angular::{
    AngularLineProjector, horizon_boundary_latitude_deg, horizon_crossing_exists,
    horizon_hour_angle_deg, meridian_longitudes,
};
pub use antimeridian::{
    BandPolygon, PathVertex, curve_band, meridian_band, meridian_path, split_at_antimeridian,
    with_breaks,
};
pub use error::LineError;
pub use local_space::{LocalSpaceConfig, LocalSpaceProjector};
pub use proximity::{
    DEFAULT_TOLERANCE_DEG, ProximityResult, curve_longitude_at, curve_matches, find_in_bands,
    meridian_matches,
};
pub use types::{
    ALL_ANGLES, Angle, AngularLines, CurveLine, Equatorial, GeoPoint, LatitudeGrid,
    LocalSpaceLine, MeridianLine, ObserverLocation, ReferencePoint,
};
