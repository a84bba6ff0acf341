//! Display metadata for the bodies a request may select.

use std::collections::{BTreeMap, HashSet};

use acg_lines::{ALL_ANGLES, Angle};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One selectable body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyInfo {
    /// Lowercase identifier, e.g. `"sun"`.
    pub key: String,
    /// English display name.
    pub name: String,
    /// `#RRGGBB` display colour.
    pub color: String,
    /// Short characterisation of the body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype: Option<String>,
    /// What the body means on each of its lines.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meanings: BTreeMap<Angle, String>,
}

impl BodyInfo {
    pub fn new(key: &str, name: &str, color: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            archetype: None,
            meanings: BTreeMap::new(),
        }
    }

    pub fn meaning(&self, angle: Angle) -> Option<&str> {
        self.meanings.get(&angle).map(String::as_str)
    }
}

struct BuiltinMeaning {
    key: &'static str,
    archetype: &'static str,
    /// MC, IC, AC, DC.
    lines: [&'static str; 4],
}

const BUILTIN_MEANINGS: [BuiltinMeaning; 4] = [
    BuiltinMeaning {
        key: "sun",
        archetype: "Hero, king. Centre of consciousness, ego, vitality, purpose.",
        lines: [
            "Career success, public recognition, ambitious goals reached; noticed as a leader.",
            "Vitality and a strong sense of self found through home, family and roots.",
            "Self shines with confidence and makes a strong first impression; leadership and self-expression.",
            "Draws strong, radiant partners who mirror one's potential; relationships drive self-discovery.",
        ],
    },
    BuiltinMeaning {
        key: "moon",
        archetype: "Mother, queen. Emotion, intuition, security, the public, the past.",
        lines: [
            "Careers in nurturing fields such as healing, food or property; popularity with public emotional exposure.",
            "The ultimate home line: belonging, ancestral ties and emotional security.",
            "Heightened sensitivity and intuition; seen by others as caring and empathetic.",
            "Draws nurturing or emotionally karmic partners; deep emotional security sought in relationships.",
        ],
    },
    BuiltinMeaning {
        key: "venus",
        archetype: "Lover, artist. Love, beauty, sociability, money, values.",
        lines: [
            "Success in art, design, diplomacy or finance; a popular and well-liked public image.",
            "A beautiful, harmonious home; deep peace and contentment in private life.",
            "Personal charm and magnetism grow; seen as graceful, artistic and sociable.",
            "The classic soulmate or honeymoon line; romantic, harmonious partners.",
        ],
    },
    BuiltinMeaning {
        key: "jupiter",
        archetype: "Sage, king. Expansion, luck, growth, wisdom, optimism.",
        lines: [
            "The strongest line for career success, fame and abundance; promotion and expansion.",
            "A wide, happy home; deeper beliefs and inner growth; luck through property and family.",
            "Optimism, confidence and luck increase; a generous, larger-than-life persona.",
            "Draws beneficial, wise or foreign partners; growth arrives through relationships.",
        ],
    },
];

fn builtin_body(key: &str, name: &str, color: &str) -> BodyInfo {
    let mut info = BodyInfo::new(key, name, color);
    if let Some(m) = BUILTIN_MEANINGS.iter().find(|m| m.key == key) {
        info.archetype = Some(m.archetype.to_string());
        info.meanings = ALL_ANGLES
            .iter()
            .zip(m.lines)
            .map(|(&angle, text)| (angle, text.to_string()))
            .collect();
    }
    info
}

const BUILTIN_BODIES: [(&str, &str, &str); 10] = [
    ("sun", "Sun", "#FFD700"),
    ("moon", "Moon", "#C0C0C0"),
    ("mercury", "Mercury", "#8B4513"),
    ("venus", "Venus", "#FF69B4"),
    ("mars", "Mars", "#FF4500"),
    ("jupiter", "Jupiter", "#32CD32"),
    ("saturn", "Saturn", "#4682B4"),
    ("uranus", "Uranus", "#00FFFF"),
    ("neptune", "Neptune", "#0000FF"),
    ("pluto", "Pluto", "#800080"),
];

/// Ordered body metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyTable {
    entries: Vec<BodyInfo>,
}

impl Default for BodyTable {
    fn default() -> Self {
        Self {
            entries: BUILTIN_BODIES
                .iter()
                .map(|&(key, name, color)| builtin_body(key, name, color))
                .collect(),
        }
    }
}

impl BodyTable {
    pub fn new(entries: Vec<BodyInfo>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&BodyInfo> {
        self.entries.iter().find(|b| b.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyInfo> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.entries.is_empty() {
            return Err(ConfigError::Invalid("body table must not be empty".into()));
        }
        let mut seen = HashSet::new();
        for body in &self.entries {
            if body.key.is_empty() {
                return Err(ConfigError::Invalid("body key must not be empty".into()));
            }
            if !seen.insert(body.key.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate body key {:?}", body.key)));
            }
            if !is_hex_color(&body.color) {
                return Err(ConfigError::Invalid(format!(
                    "body {:?} has malformed colour {:?}",
                    body.key, body.color
                )));
            }
            if let Some((angle, _)) = body.meanings.iter().find(|(_, text)| text.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "body {:?} has an empty {angle:?} meaning",
                    body.key
                )));
            }
        }
        Ok(())
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
