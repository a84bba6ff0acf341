//! The projection engine.
//!
//! [`Engine`] resolves body positions through a [`CelestialFrameProvider`],
//! memoizes them per request (and optionally per process), and hands them
//! to the angular and local-space projectors. Provider lookups for the
//! bodies of one request run in parallel.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Formatter;
use std::sync::Arc;

use acg_config::{AppConfig, BodyTable, Gazetteer, Region};
use acg_frames::{HorizontalCoords, normalize_360};
use acg_lines::{
    AngularLineProjector, AngularLines, DEFAULT_TOLERANCE_DEG, Equatorial, LatitudeGrid,
    LineError, LocalSpaceConfig, LocalSpaceLine, LocalSpaceProjector, ObserverLocation,
    ProximityResult, ReferencePoint, find_in_bands,
};
use acg_time::{SiderealResolver, UtcInstant};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::body::Body;
use crate::cache::PositionCache;
use crate::error::EngineError;
use crate::provider::CelestialFrameProvider;

/// Engine configuration used at startup time.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub bodies: BodyTable,
    /// Places searched by the proximity finder, in reporting order.
    pub gazetteer: Vec<ReferencePoint>,
    pub grid: LatitudeGrid,
    pub local_space: LocalSpaceConfig,
    pub sidereal: SiderealResolver,
    pub default_tolerance_deg: f64,
    /// Process-wide position cache size; 0 disables it.
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bodies: BodyTable::default(),
            gazetteer: Gazetteer::default()
                .filter_region(Region::World)
                .reference_points(),
            grid: LatitudeGrid::default(),
            local_space: LocalSpaceConfig::default(),
            sidereal: SiderealResolver::default(),
            default_tolerance_deg: DEFAULT_TOLERANCE_DEG,
            cache_capacity: 256,
        }
    }
}

impl EngineConfig {
    pub fn from_app_config(app: &AppConfig) -> Result<Self, EngineError> {
        app.validate()?;
        Ok(Self {
            bodies: app.bodies.clone(),
            gazetteer: app.proximity_points(),
            grid: app.settings.grid.to_grid()?,
            local_space: app.settings.local_space,
            sidereal: app.settings.sidereal_resolver()?,
            default_tolerance_deg: app.settings.tolerance_deg,
            cache_capacity: app.settings.cache_capacity,
        })
    }

    fn validate(&self) -> Result<(), EngineError> {
        self.bodies.validate()?;
        for point in &self.gazetteer {
            point.validate()?;
        }
        self.local_space.validate()?;
        if !self.default_tolerance_deg.is_finite() || self.default_tolerance_deg < 0.0 {
            return Err(EngineError::InvalidConfig(
                "default_tolerance_deg must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Angular-line projection request.
#[derive(Debug, Clone, PartialEq)]
pub struct AngularRequest {
    pub instant: UtcInstant,
    pub bodies: Vec<Body>,
    /// Proximity tolerance; the engine default when `None`.
    pub tolerance_deg: Option<f64>,
    /// Greenwich sidereal angle to project with instead of the one
    /// derived from `instant`, e.g. from
    /// [`acg_time::sidereal_from_mc_longitude_deg`].
    pub sidereal_deg: Option<f64>,
}

impl AngularRequest {
    pub fn new(instant: UtcInstant, bodies: impl Into<Vec<Body>>) -> Self {
        Self {
            instant,
            bodies: bodies.into(),
            tolerance_deg: None,
            sidereal_deg: None,
        }
    }

    pub fn with_tolerance(mut self, tolerance_deg: f64) -> Self {
        self.tolerance_deg = Some(tolerance_deg);
        self
    }

    pub fn with_sidereal(mut self, sidereal_deg: f64) -> Self {
        self.sidereal_deg = Some(sidereal_deg);
        self
    }
}

/// Local-space projection request.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSpaceRequest {
    pub instant: UtcInstant,
    pub bodies: Vec<Body>,
    pub observer: ObserverLocation,
}

/// Telemetry from a request or batch of requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct QueryStats {
    /// Provider calls actually made.
    pub evaluations: u32,
    /// Lookups answered by the request memo or the process cache.
    pub cache_hits: u32,
}

impl QueryStats {
    fn since(self, earlier: QueryStats) -> QueryStats {
        QueryStats {
            evaluations: self.evaluations - earlier.evaluations,
            cache_hits: self.cache_hits - earlier.cache_hits,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AngularReport {
    pub instant: UtcInstant,
    /// Greenwich sidereal angle, degrees in [0, 360).
    pub sidereal_deg: f64,
    pub tolerance_deg: f64,
    pub lines: BTreeMap<Body, AngularLines>,
    pub proximity: ProximityResult<Body>,
    #[serde(skip)]
    pub stats: QueryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalSpaceReport {
    pub instant: UtcInstant,
    pub observer: ObserverLocation,
    pub lines: BTreeMap<Body, LocalSpaceLine>,
    #[serde(skip)]
    pub stats: QueryStats,
}

/// Per-request memoization context.
///
/// Created at the start of each request (or same-instant batch group),
/// dropped at the end. Apparent positions are keyed on the observer's
/// coordinate bits.
struct ComputationContext {
    positions: HashMap<(UtcInstant, Body), Equatorial>,
    apparent: HashMap<(UtcInstant, Body, u64, u64), HorizontalCoords>,
    evaluations: u32,
    cache_hits: u32,
}

impl ComputationContext {
    fn new() -> Self {
        Self {
            positions: HashMap::with_capacity(Body::ALL.len()),
            apparent: HashMap::new(),
            evaluations: 0,
            cache_hits: 0,
        }
    }

    fn stats(&self) -> QueryStats {
        QueryStats {
            evaluations: self.evaluations,
            cache_hits: self.cache_hits,
        }
    }
}

/// Projection engine.
///
/// `Engine` is [`Send`] + [`Sync`] and can be shared via `Arc<Engine>`.
/// Each request builds its own [`ComputationContext`]; only the optional
/// [`PositionCache`] is shared between requests.
pub struct Engine {
    config: EngineConfig,
    provider: Arc<dyn CelestialFrameProvider>,
    angular: AngularLineProjector,
    local_space: LocalSpaceProjector,
    cache: PositionCache,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("cached_positions", &self.cache.len())
            .finish()
    }
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        provider: Arc<dyn CelestialFrameProvider>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let angular = AngularLineProjector::new(config.grid);
        let local_space = LocalSpaceProjector::new(config.local_space)?;
        let cache = PositionCache::new(config.cache_capacity);
        Ok(Self {
            config,
            provider,
            angular,
            local_space,
            cache,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &PositionCache {
        &self.cache
    }

    /// Greenwich sidereal angle of `instant`, degrees in [0, 360).
    pub fn sidereal_deg(&self, instant: UtcInstant) -> f64 {
        self.config.sidereal.greenwich_deg(instant)
    }

    /// Deduplicated, ordered selection; every body must be configured.
    fn resolve_bodies(&self, bodies: &[Body]) -> Result<Vec<Body>, EngineError> {
        if bodies.is_empty() {
            return Err(EngineError::InvalidRequest("no bodies selected".into()));
        }
        let unique: BTreeSet<Body> = bodies.iter().copied().collect();
        if let Some(missing) = unique.iter().find(|b| !self.config.bodies.contains(b.key())) {
            return Err(EngineError::InvalidRequest(format!(
                "body {missing} is not in the body table"
            )));
        }
        Ok(unique.into_iter().collect())
    }

    /// Positions of `bodies` at `instant`, in `bodies` order.
    ///
    /// Memo and cache hits are taken first; the remaining bodies are asked
    /// of the provider in parallel and recorded once all succeed.
    fn positions(
        &self,
        instant: UtcInstant,
        bodies: &[Body],
        ctx: &mut ComputationContext,
    ) -> Result<Vec<(Body, Equatorial)>, EngineError> {
        let mut resolved = Vec::with_capacity(bodies.len());
        let mut missing = Vec::new();
        for &body in bodies {
            let key = (instant, body);
            if let Some(&cached) = ctx.positions.get(&key) {
                ctx.cache_hits += 1;
                resolved.push((body, cached));
            } else if let Some(cached) = self.cache.get(instant, body) {
                ctx.cache_hits += 1;
                ctx.positions.insert(key, cached);
                resolved.push((body, cached));
            } else {
                missing.push(body);
            }
        }

        let fetched = missing
            .par_iter()
            .map(|&body| {
                self.provider
                    .position(instant, body)
                    .map(|eq| (body, eq))
                    .map_err(|source| {
                        warn!(%body, %instant, error = %source, "position lookup failed");
                        EngineError::Provider { body, source }
                    })
            })
            .collect::<Result<Vec<(Body, Equatorial)>, EngineError>>()?;

        for &(body, eq) in &fetched {
            ctx.evaluations += 1;
            ctx.positions.insert((instant, body), eq);
            self.cache.insert(instant, body, eq);
        }
        resolved.extend(fetched);
        resolved.sort_by_key(|&(body, _)| body);
        Ok(resolved)
    }

    /// Apparent positions of `bodies` from `observer`, in `bodies` order.
    fn apparents(
        &self,
        instant: UtcInstant,
        bodies: &[Body],
        observer: ObserverLocation,
        ctx: &mut ComputationContext,
    ) -> Result<Vec<(Body, HorizontalCoords)>, EngineError> {
        let lat_bits = observer.latitude_deg().to_bits();
        let lon_bits = observer.longitude_deg().to_bits();
        let mut resolved = Vec::with_capacity(bodies.len());
        let mut missing = Vec::new();
        for &body in bodies {
            match ctx.apparent.get(&(instant, body, lat_bits, lon_bits)) {
                Some(&cached) => {
                    ctx.cache_hits += 1;
                    resolved.push((body, cached));
                }
                None => missing.push(body),
            }
        }

        let fetched = missing
            .par_iter()
            .map(|&body| {
                self.provider
                    .apparent(instant, body, observer)
                    .map(|hz| (body, hz))
                    .map_err(|source| {
                        warn!(%body, %instant, error = %source, "apparent position lookup failed");
                        EngineError::Provider { body, source }
                    })
            })
            .collect::<Result<Vec<(Body, HorizontalCoords)>, EngineError>>()?;

        for &(body, hz) in &fetched {
            ctx.evaluations += 1;
            ctx.apparent.insert((instant, body, lat_bits, lon_bits), hz);
        }
        resolved.extend(fetched);
        resolved.sort_by_key(|&(body, _)| body);
        Ok(resolved)
    }

    /// MC/IC/AC/DC lines for each selected body plus proximity matches
    /// against the configured gazetteer.
    pub fn angular(&self, request: &AngularRequest) -> Result<AngularReport, EngineError> {
        let mut ctx = ComputationContext::new();
        let mut report = self.angular_with_ctx(request, &mut ctx)?;
        report.stats = ctx.stats();
        Ok(report)
    }

    fn angular_with_ctx(
        &self,
        request: &AngularRequest,
        ctx: &mut ComputationContext,
    ) -> Result<AngularReport, EngineError> {
        let tolerance_deg = request
            .tolerance_deg
            .unwrap_or(self.config.default_tolerance_deg);
        if !tolerance_deg.is_finite() || tolerance_deg < 0.0 {
            return Err(LineError::InvalidTolerance(tolerance_deg).into());
        }
        let bodies = self.resolve_bodies(&request.bodies)?;
        let instant = request.instant;
        let sidereal_deg = match request.sidereal_deg {
            Some(deg) if deg.is_finite() => normalize_360(deg),
            Some(deg) => {
                return Err(EngineError::InvalidRequest(format!(
                    "sidereal angle must be finite, got {deg}"
                )));
            }
            None => self.sidereal_deg(instant),
        };
        info!(%instant, bodies = bodies.len(), sidereal_deg, "angular projection");

        let positions = self.positions(instant, &bodies, ctx)?;

        let projector = self.angular;
        let lines = positions
            .par_iter()
            .map(|&(body, eq)| {
                debug!(%body, ra_deg = eq.ra_deg, dec_deg = eq.dec_deg, "projecting angular lines");
                projector.project(eq, sidereal_deg).map(|lines| (body, lines))
            })
            .collect::<Result<BTreeMap<Body, AngularLines>, LineError>>()?;

        let proximity = find_in_bands(
            lines.iter().map(|(body, l)| (*body, l)),
            &self.config.gazetteer,
            tolerance_deg,
        )?;
        debug!(matches = proximity.match_count(), "proximity search done");

        Ok(AngularReport {
            instant,
            sidereal_deg,
            tolerance_deg,
            lines,
            proximity,
            stats: QueryStats::default(),
        })
    }

    /// Run several angular requests, sharing memoization between requests
    /// at the same instant. Results come back in input order.
    pub fn angular_batch(
        &self,
        requests: &[AngularRequest],
    ) -> (Vec<Result<AngularReport, EngineError>>, QueryStats) {
        let mut results: Vec<Option<Result<AngularReport, EngineError>>> =
            (0..requests.len()).map(|_| None).collect();

        let mut indexed: Vec<(UtcInstant, usize)> = requests
            .iter()
            .enumerate()
            .map(|(i, r)| (r.instant, i))
            .collect();
        indexed.sort_unstable();

        let mut total = QueryStats::default();
        for group in indexed.chunk_by(|a, b| a.0 == b.0) {
            let mut ctx = ComputationContext::new();
            for &(_, idx) in group {
                let before = ctx.stats();
                let result = self.angular_with_ctx(&requests[idx], &mut ctx).map(|mut report| {
                    report.stats = ctx.stats().since(before);
                    report
                });
                results[idx] = Some(result);
            }
            let group_stats = ctx.stats();
            total.evaluations += group_stats.evaluations;
            total.cache_hits += group_stats.cache_hits;
        }

        let results = results
            .into_iter()
            .map(|r| {
                r.unwrap_or_else(|| Err(EngineError::InvalidRequest("request not processed".into())))
            })
            .collect();
        (results, total)
    }

    /// Constant-bearing rays from the observer toward each selected body.
    pub fn local_space(&self, request: &LocalSpaceRequest) -> Result<LocalSpaceReport, EngineError> {
        let mut ctx = ComputationContext::new();
        let bodies = self.resolve_bodies(&request.bodies)?;
        let instant = request.instant;
        let observer = request.observer;
        info!(
            %instant,
            bodies = bodies.len(),
            lat = observer.latitude_deg(),
            lon = observer.longitude_deg(),
            "local-space projection"
        );

        let horizontals = self.apparents(instant, &bodies, observer, &mut ctx)?;

        let projector = self.local_space;
        let lines = horizontals
            .par_iter()
            .map(|&(body, hz)| {
                debug!(%body, azimuth_deg = hz.azimuth_deg, altitude_deg = hz.altitude_deg, "projecting local-space ray");
                projector.project(observer, hz).map(|line| (body, line))
            })
            .collect::<Result<BTreeMap<Body, LocalSpaceLine>, LineError>>()?;

        Ok(LocalSpaceReport {
            instant,
            observer,
            lines,
            stats: ctx.stats(),
        })
    }
}
