//! Threshold classifier: metric → quality tier → display colour.
//!
//! Each metric owns three floors, best tier first. A value at or above a floor
//! takes that tier; anything below the last floor (NaN included) is Poor.
//!
//! | Metric | Excellent | Good        | Fair         | Poor   |
//! |--------|-----------|-------------|--------------|--------|
//! | RSRP   | ≥ -80     | [-90, -80)  | [-100, -90)  | < -100 |
//! | RSRQ   | ≥ -10     | [-15, -10)  | [-20, -15)   | < -20  |
//! | SINR   | ≥ 20      | [13, 20)    | [0, 13)      | < 0    |
//! | RSSI   | ≥ -65     | [-75, -65)  | [-85, -75)   | < -85  |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::filter::ValueRange;

// ── Metric ────────────────────────────────────────────────────────────────────

/// Recognised signal-quality metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Metric {
    Rsrp,
    Rssi,
    Rsrq,
    Sinr,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Rsrp, Metric::Rssi, Metric::Rsrq, Metric::Sinr];

    pub fn name(self) -> &'static str {
        match self {
            Metric::Rsrp => "RSRP",
            Metric::Rssi => "RSSI",
            Metric::Rsrq => "RSRQ",
            Metric::Sinr => "SINR",
        }
    }

    /// Case-insensitive lookup of a column or metric name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Tier floors for this metric, best first.
    pub fn bands(self) -> &'static [Band; 3] {
        match self {
            Metric::Rsrp => &RSRP_BANDS,
            Metric::Rssi => &RSSI_BANDS,
            Metric::Rsrq => &RSRQ_BANDS,
            Metric::Sinr => &SINR_BANDS,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownMetric(s.to_string()))
    }
}

// ── Tier and colour ───────────────────────────────────────────────────────────

/// Quality bucket, ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Excellent, Tier::Good, Tier::Fair, Tier::Poor];

    pub fn name(self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent",
            Tier::Good => "Good",
            Tier::Fair => "Fair",
            Tier::Poor => "Poor",
        }
    }

    pub fn color(self) -> SignalColor {
        match self {
            Tier::Excellent => SignalColor::Green,
            Tier::Good => SignalColor::Orange,
            Tier::Fair => SignalColor::DarkOrange,
            Tier::Poor => SignalColor::Red,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tier {s:?} (expected Excellent, Good, Fair or Poor)"))
    }
}

/// Marker colour. Names are the CSS colour keywords used by the map renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalColor {
    Green,
    Orange,
    DarkOrange,
    Red,
    Gray,
}

impl SignalColor {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalColor::Green => "green",
            SignalColor::Orange => "orange",
            SignalColor::DarkOrange => "darkorange",
            SignalColor::Red => "red",
            SignalColor::Gray => "gray",
        }
    }
}

impl fmt::Display for SignalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Threshold tables ──────────────────────────────────────────────────────────

/// (floor, tier): values ≥ floor belong to tier. Poor is the fall-through.
pub type Band = (f64, Tier);

const RSRP_BANDS: [Band; 3] = [(-80.0, Tier::Excellent), (-90.0, Tier::Good), (-100.0, Tier::Fair)];
const RSRQ_BANDS: [Band; 3] = [(-10.0, Tier::Excellent), (-15.0, Tier::Good), (-20.0, Tier::Fair)];
const SINR_BANDS: [Band; 3] = [(20.0, Tier::Excellent), (13.0, Tier::Good), (0.0, Tier::Fair)];
const RSSI_BANDS: [Band; 3] = [(-65.0, Tier::Excellent), (-75.0, Tier::Good), (-85.0, Tier::Fair)];

/// Classifier bound to one metric selection. Unrecognised metrics classify
/// nothing and colour everything gray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    bands: Option<&'static [Band; 3]>,
}

impl Classifier {
    pub fn new(metric: Option<Metric>) -> Self {
        Self { bands: metric.map(Metric::bands) }
    }

    pub fn for_name(name: &str) -> Self {
        Self::new(Metric::from_name(name))
    }

    pub fn is_classified(&self) -> bool {
        self.bands.is_some()
    }

    pub fn tier(&self, value: f64) -> Option<Tier> {
        let bands = self.bands?;
        Some(
            bands
                .iter()
                .find(|(floor, _)| value >= *floor)
                .map(|&(_, tier)| tier)
                .unwrap_or(Tier::Poor),
        )
    }

    pub fn color(&self, value: f64) -> SignalColor {
        self.tier(value).map(Tier::color).unwrap_or(SignalColor::Gray)
    }

    /// Preset intervals with the open ends pinned to the observed `bounds`.
    pub fn presets(&self, bounds: ValueRange) -> Option<PresetTable> {
        let [(excellent, _), (good, _), (fair, _)] = *self.bands?;
        Some(PresetTable {
            excellent: ValueRange::new(excellent, bounds.hi),
            good: ValueRange::new(good, excellent),
            fair: ValueRange::new(fair, good),
            poor: ValueRange::new(bounds.lo, fair),
        })
    }
}

/// Colour for `value` under the named metric; gray if the metric is unknown.
pub fn get_color(metric: &str, value: f64) -> SignalColor {
    Classifier::for_name(metric).color(value)
}

/// The four named presets resolved against a dataset's observed range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PresetTable {
    pub excellent: ValueRange,
    pub good: ValueRange,
    pub fair: ValueRange,
    pub poor: ValueRange,
}

impl PresetTable {
    pub fn get(&self, tier: Tier) -> ValueRange {
        match tier {
            Tier::Excellent => self.excellent,
            Tier::Good => self.good,
            Tier::Fair => self.fair,
            Tier::Poor => self.poor,
        }
    }
}
