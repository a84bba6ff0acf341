//! Map-ready geometry for engine reports.
//!
//! Each body gets date-line safe polylines for its four lines and the
//! filled ± tolerance bands around them, tagged with the body's display
//! name and colour. Local-space rays get the same break treatment.

use std::collections::BTreeMap;

use acg_config::{BodyInfo, BodyTable};
use acg_lines::{
    Angle, BandPolygon, LatitudeGrid, PathVertex, curve_band, meridian_band, meridian_path,
    with_breaks,
};
use serde::Serialize;

use crate::body::Body;
use crate::engine::{AngularReport, LocalSpaceReport};
use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyLayer {
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archetype: Option<String>,
    /// Line meanings from the body table, where configured.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meanings: BTreeMap<Angle, String>,
    pub paths: BTreeMap<Angle, Vec<PathVertex>>,
    pub bands: BTreeMap<Angle, Vec<BandPolygon>>,
}

/// Local-space ray ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RayLayer {
    pub name: String,
    pub color: String,
    pub azimuth_deg: f64,
    pub altitude_deg: f64,
    pub path: Vec<PathVertex>,
}

fn body_info(bodies: &BodyTable, body: Body) -> Result<&BodyInfo, EngineError> {
    bodies
        .get(body.key())
        .ok_or_else(|| EngineError::InvalidRequest(format!("body {body} is not in the body table")))
}

/// Build one layer per body in `report`, bands `band_width_deg` wide on
/// either side of each line.
pub fn map_layers(
    report: &AngularReport,
    bodies: &BodyTable,
    grid: &LatitudeGrid,
    band_width_deg: f64,
) -> Result<BTreeMap<Body, BodyLayer>, EngineError> {
    let mut layers = BTreeMap::new();
    for (&body, lines) in &report.lines {
        let info = body_info(bodies, body)?;

        let mut paths = BTreeMap::new();
        let mut bands = BTreeMap::new();
        for meridian in [&lines.mc, &lines.ic] {
            paths.insert(meridian.angle, with_breaks(&meridian_path(meridian, grid)));
            bands.insert(
                meridian.angle,
                meridian_band(
                    meridian.longitude_deg,
                    band_width_deg,
                    grid.min_deg(),
                    grid.max_deg(),
                )?,
            );
        }
        for curve in [&lines.ac, &lines.dc] {
            paths.insert(curve.angle, with_breaks(&curve.samples));
            bands.insert(curve.angle, curve_band(curve, band_width_deg)?);
        }

        layers.insert(
            body,
            BodyLayer {
                name: info.name.clone(),
                color: info.color.clone(),
                archetype: info.archetype.clone(),
                meanings: info.meanings.clone(),
                paths,
                bands,
            },
        );
    }
    Ok(layers)
}

/// One ray layer per body in `report`, broken where it crosses ±180°.
pub fn local_space_layers(
    report: &LocalSpaceReport,
    bodies: &BodyTable,
) -> Result<BTreeMap<Body, RayLayer>, EngineError> {
    report
        .lines
        .iter()
        .map(|(&body, line)| {
            let info = body_info(bodies, body)?;
            Ok((
                body,
                RayLayer {
                    name: info.name.clone(),
                    color: info.color.clone(),
                    azimuth_deg: line.azimuth_deg,
                    altitude_deg: line.altitude_deg,
                    path: with_breaks(&line.points),
                },
            ))
        })
        .collect()
}
