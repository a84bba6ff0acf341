use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use acg_config::{AppConfig, Region};
use acg_core::{
    AngularRequest, Body, BodyLayer, Engine, EngineConfig, LocalSpaceRequest, RayLayer,
    StaticProvider, local_space_layers, map_layers,
};
use acg_frames::OBLIQUITY_J2000_DEG;
use acg_lines::ObserverLocation;
use acg_time::{UtcInstant, sidereal_from_mc_longitude_deg};
use anyhow::{Context, bail};
use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "acg", about = "Astro-cartography line projection CLI")]
struct Cli {
    /// JSON config file (bodies, gazetteer, settings)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct TimeArgs {
    /// UTC instant (RFC 3339, e.g. 2024-03-20T12:00:00Z)
    #[arg(long)]
    date: Option<UtcInstant>,
    /// Calendar date (YYYY-MM-DD), cast for 12:00 UTC
    #[arg(long)]
    noon: Option<NaiveDate>,
}

impl TimeArgs {
    fn instant(&self) -> anyhow::Result<UtcInstant> {
        match (self.date, self.noon) {
            (Some(instant), _) => Ok(instant),
            (None, Some(day)) => Ok(UtcInstant::noon_utc(day.year(), day.month(), day.day())?),
            (None, None) => bail!("either --date or --noon is required"),
        }
    }
}

#[derive(Args)]
struct BodyArgs {
    /// JSON file of body positions: {"sun": {"ra_deg": .., "dec_deg": ..}, ..}
    /// (ecliptic "lon_deg"/"lat_deg" also accepted)
    #[arg(long)]
    positions: PathBuf,
    /// Comma-separated bodies (default: every body in the positions file)
    #[arg(long, value_delimiter = ',')]
    bodies: Vec<Body>,
}

#[derive(Subcommand)]
enum Commands {
    /// Greenwich sidereal angle, and the local one for a longitude
    Sidereal {
        #[command(flatten)]
        time: TimeArgs,
        /// East longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        longitude: Option<f64>,
    },
    /// Sidereal angle that puts an ecliptic longitude on the meridian
    Ramc {
        /// Ecliptic longitude of the MC in degrees
        mc: f64,
        /// Obliquity in degrees (default: J2000 mean obliquity)
        #[arg(long)]
        obliquity: Option<f64>,
    },
    /// MC/IC/AC/DC lines and the places near them
    Lines {
        #[command(flatten)]
        time: TimeArgs,
        #[command(flatten)]
        body: BodyArgs,
        /// Longitude tolerance in degrees (default from config)
        #[arg(long)]
        tolerance: Option<f64>,
        /// Greenwich sidereal angle in degrees, overriding the one for the date
        #[arg(long, allow_negative_numbers = true, conflicts_with = "mc")]
        sidereal: Option<f64>,
        /// Ecliptic longitude to put on the Greenwich meridian (J2000 obliquity)
        #[arg(long, allow_negative_numbers = true)]
        mc: Option<f64>,
    },
    /// Date-line safe paths and filled bands for drawing the lines
    Bands {
        #[command(flatten)]
        time: TimeArgs,
        #[command(flatten)]
        body: BodyArgs,
        /// Band half-width in degrees (default: the proximity tolerance)
        #[arg(long)]
        width: Option<f64>,
    },
    /// Local-space rays from an observer toward each body
    LocalSpace {
        #[command(flatten)]
        time: TimeArgs,
        #[command(flatten)]
        body: BodyArgs,
        /// Observer latitude in degrees
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,
        /// Observer east longitude in degrees
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
        /// Observer taken from the gazetteer by name
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        place: Option<String>,
        /// Restrict --place lookup to a region (world, japan)
        #[arg(long, value_parser = parse_region)]
        region: Option<Region>,
        /// Emit date-line safe ray paths with body names and colours
        #[arg(long)]
        layers: bool,
    },
    /// List gazetteer places
    Cities {
        /// Only places in this region (world, japan)
        #[arg(long, value_parser = parse_region)]
        region: Option<Region>,
    },
}

#[derive(Serialize)]
struct SiderealOutput {
    instant: UtcInstant,
    greenwich_deg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    local_deg: Option<f64>,
}

#[derive(Serialize)]
struct RamcOutput {
    mc_deg: f64,
    obliquity_deg: f64,
    ramc_deg: f64,
}

#[derive(Serialize)]
struct BandsOutput {
    instant: UtcInstant,
    width_deg: f64,
    layers: BTreeMap<Body, BodyLayer>,
}

#[derive(Serialize)]
struct RayLayersOutput {
    instant: UtcInstant,
    observer: ObserverLocation,
    layers: BTreeMap<Body, RayLayer>,
}

fn parse_region(s: &str) -> Result<Region, String> {
    match s.to_ascii_lowercase().as_str() {
        "world" => Ok(Region::World),
        "japan" => Ok(Region::Japan),
        _ => Err(format!("unknown region {s:?} (expected world or japan)")),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

/// Engine over the positions file plus the effective body selection.
fn build_engine(app: &AppConfig, body: &BodyArgs) -> anyhow::Result<(Engine, Vec<Body>)> {
    let config = EngineConfig::from_app_config(app)?;
    let provider = StaticProvider::load(&body.positions, config.sidereal)
        .with_context(|| format!("failed to load positions {}", body.positions.display()))?;
    let bodies = if body.bodies.is_empty() {
        let mut all: Vec<Body> = provider.bodies().collect();
        all.sort();
        all
    } else {
        body.bodies.clone()
    };
    debug!(bodies = bodies.len(), "engine ready");
    Ok((Engine::new(config, Arc::new(provider))?, bodies))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let app = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Sidereal { time, longitude } => {
            let instant = time.instant()?;
            let resolver = app.settings.sidereal_resolver()?;
            print_json(&SiderealOutput {
                instant,
                greenwich_deg: resolver.greenwich_deg(instant),
                local_deg: longitude.map(|lon| resolver.local_deg(instant, lon)),
            })
        }

        Commands::Ramc { mc, obliquity } => {
            let obliquity_deg = obliquity.unwrap_or(OBLIQUITY_J2000_DEG);
            print_json(&RamcOutput {
                mc_deg: mc,
                obliquity_deg,
                ramc_deg: sidereal_from_mc_longitude_deg(mc, obliquity_deg),
            })
        }

        Commands::Lines {
            time,
            body,
            tolerance,
            sidereal,
            mc,
        } => {
            let (engine, bodies) = build_engine(&app, &body)?;
            let mut request = AngularRequest::new(time.instant()?, bodies);
            request.tolerance_deg = tolerance;
            request.sidereal_deg = sidereal
                .or_else(|| mc.map(|mc| sidereal_from_mc_longitude_deg(mc, OBLIQUITY_J2000_DEG)));
            print_json(&engine.angular(&request)?)
        }

        Commands::Bands { time, body, width } => {
            let (engine, bodies) = build_engine(&app, &body)?;
            let instant = time.instant()?;
            let report = engine.angular(&AngularRequest::new(instant, bodies))?;
            let width_deg = width.unwrap_or(report.tolerance_deg);
            let config = engine.config();
            let layers = map_layers(&report, &config.bodies, &config.grid, width_deg)?;
            print_json(&BandsOutput {
                instant,
                width_deg,
                layers,
            })
        }

        Commands::LocalSpace {
            time,
            body,
            lat,
            lon,
            place,
            region,
            layers,
        } => {
            let observer = match (place, lat, lon) {
                (Some(name), _, _) => {
                    let entry = app
                        .gazetteer
                        .find(&name, region)
                        .with_context(|| format!("no place named {name:?} in the gazetteer"))?;
                    ObserverLocation::new(entry.point.lat_deg, entry.point.lon_deg)?
                }
                (None, Some(lat), Some(lon)) => ObserverLocation::new(lat, lon)?,
                _ => bail!("an observer is required: --place or --lat/--lon"),
            };
            let (engine, bodies) = build_engine(&app, &body)?;
            let report = engine.local_space(&LocalSpaceRequest {
                instant: time.instant()?,
                bodies,
                observer,
            })?;
            if layers {
                print_json(&RayLayersOutput {
                    instant: report.instant,
                    observer: report.observer,
                    layers: local_space_layers(&report, &engine.config().bodies)?,
                })
            } else {
                print_json(&report)
            }
        }

        Commands::Cities { region } => match region {
            Some(region) => print_json(&app.gazetteer.filter_region(region)),
            None => print_json(&app.gazetteer),
        },
    }
}
