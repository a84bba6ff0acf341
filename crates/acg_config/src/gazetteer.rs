//! Named places: world cities and Japanese prefectural capitals.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use acg_lines::ReferencePoint;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which list a place came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    World,
    Japan,
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::World => "world",
            Self::Japan => "japan",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazetteerEntry {
    #[serde(flatten)]
    pub point: ReferencePoint,
    #[serde(default)]
    pub region: Region,
}

const WORLD_CITIES: [(&str, f64, f64); 20] = [
    ("Tokyo", 35.6895, 139.6917),
    ("London", 51.5074, -0.1278),
    ("New York", 40.7128, -74.0060),
    ("Paris", 48.8566, 2.3522),
    ("Singapore", 1.3521, 103.8198),
    ("Hong Kong", 22.3193, 114.1694),
    ("Sydney", -33.8688, 151.2093),
    ("Los Angeles", 34.0522, -118.2437),
    ("Dubai", 25.2048, 55.2708),
    ("Rome", 41.9028, 12.4964),
    ("Cairo", 30.0444, 31.2357),
    ("Moscow", 55.7558, 37.6173),
    ("Bangkok", 13.7563, 100.5018),
    ("Seoul", 37.5665, 126.9780),
    ("Istanbul", 41.0082, 28.9784),
    ("Chicago", 41.8781, -87.6298),
    ("Berlin", 52.5200, 13.4050),
    ("Madrid", 40.4168, -3.7038),
    ("Honolulu", 21.3069, -157.8583),
    ("San Francisco", 37.7749, -122.4194),
];

// Prefectural capitals, north to south.
const JAPAN_PREFECTURES: [(&str, f64, f64); 47] = [
    ("Hokkaido", 43.06417, 141.34694),
    ("Aomori", 40.82444, 140.74000),
    ("Iwate", 39.70361, 141.15250),
    ("Miyagi", 38.26889, 140.87194),
    ("Akita", 39.71861, 140.10250),
    ("Yamagata", 38.24056, 140.36333),
    ("Fukushima", 37.75000, 140.46778),
    ("Ibaraki", 36.34139, 140.44667),
    ("Tochigi", 36.56583, 139.88361),
    ("Gunma", 36.39111, 139.06083),
    ("Saitama", 35.86139, 139.64556),
    ("Chiba", 35.60472, 140.12333),
    ("Tokyo", 35.68944, 139.69167),
    ("Kanagawa", 35.44778, 139.64250),
    ("Niigata", 37.90222, 139.02361),
    ("Toyama", 36.69528, 137.21139),
    ("Ishikawa", 36.59444, 136.62556),
    ("Fukui", 36.06528, 136.22194),
    ("Yamanashi", 35.66389, 138.56833),
    ("Nagano", 36.65139, 138.18111),
    ("Gifu", 35.42306, 136.72222),
    ("Shizuoka", 34.97694, 138.38306),
    ("Aichi", 35.18028, 136.90667),
    ("Mie", 34.73028, 136.50861),
    ("Shiga", 35.00444, 135.86833),
    ("Kyoto", 35.02139, 135.75556),
    ("Osaka", 34.68639, 135.52000),
    ("Hyogo", 34.69139, 135.18306),
    ("Nara", 34.68528, 135.83278),
    ("Wakayama", 34.22611, 135.16750),
    ("Tottori", 35.50361, 134.23833),
    ("Shimane", 35.47222, 133.05056),
    ("Okayama", 34.66167, 133.93500),
    ("Hiroshima", 34.39639, 132.45944),
    ("Yamaguchi", 34.18583, 131.47139),
    ("Tokushima", 34.06583, 134.55944),
    ("Kagawa", 34.34028, 134.04333),
    ("Ehime", 33.84167, 132.76611),
    ("Kochi", 33.55972, 133.53111),
    ("Fukuoka", 33.60639, 130.41806),
    ("Saga", 33.26389, 130.30167),
    ("Nagasaki", 32.74472, 129.87361),
    ("Kumamoto", 32.78972, 130.74167),
    ("Oita", 33.23806, 131.61250),
    ("Miyazaki", 31.91111, 131.42389),
    ("Kagoshima", 31.56028, 130.55806),
    ("Okinawa", 26.21250, 127.68111),
];

fn entries_from(table: &[(&str, f64, f64)], region: Region) -> impl Iterator<Item = GazetteerEntry> {
    table.iter().map(move |&(name, lat_deg, lon_deg)| GazetteerEntry {
        point: ReferencePoint {
            name: name.to_string(),
            lat_deg,
            lon_deg,
        },
        region,
    })
}

/// Ordered list of named places. Order is preserved in match results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
}

impl Default for Gazetteer {
    /// World cities followed by the 47 prefectural capitals.
    fn default() -> Self {
        Self {
            entries: entries_from(&WORLD_CITIES, Region::World)
                .chain(entries_from(&JAPAN_PREFECTURES, Region::Japan))
                .collect(),
        }
    }
}

impl Gazetteer {
    pub fn new(entries: Vec<GazetteerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[GazetteerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Only the places tagged with `region`, order kept.
    pub fn filter_region(&self, region: Region) -> Gazetteer {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| e.region == region)
                .cloned()
                .collect(),
        }
    }

    /// Places in any of `regions`, order kept.
    pub fn filter_regions(&self, regions: &[Region]) -> Gazetteer {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| regions.contains(&e.region))
                .cloned()
                .collect(),
        }
    }

    /// Case-insensitive lookup by name, optionally restricted to a region.
    pub fn find(&self, name: &str, region: Option<Region>) -> Option<&GazetteerEntry> {
        self.entries.iter().find(|e| {
            region.is_none_or(|r| e.region == r) && e.point.name.eq_ignore_ascii_case(name)
        })
    }

    pub fn reference_points(&self) -> Vec<ReferencePoint> {
        self.entries.iter().map(|e| e.point.clone()).collect()
    }

    /// Each point valid; names unique within a region.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            entry.point.validate()?;
            if !seen.insert((entry.region, entry.point.name.as_str())) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate place {:?} in region {}",
                    entry.point.name, entry.region
                )));
            }
        }
        Ok(())
    }
}
