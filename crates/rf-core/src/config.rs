//! Render configuration: map view, tile layer, heat and marker styles, and
//! histogram image settings. Defaults reproduce the stock look.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Base map tiles: URL template plus the credit line shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayer {
    pub url: String,
    pub name: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url: "https://stamen-tiles.a.ssl.fastly.net/terrain/{z}/{x}/{y}.png".into(),
            name: "Stamen Terrain".into(),
            attribution: "Map tiles by Stamen Design, under CC BY 3.0. Data by OpenStreetMap, under ODbL.".into(),
        }
    }
}

/// Heat-layer rendering constants. Never derived from data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatStyle {
    pub radius: u32,
    pub blur: u32,
    pub min_opacity: f64,
    pub max_zoom: u32,
}

impl Default for HeatStyle {
    fn default() -> Self {
        Self { radius: 10, blur: 15, min_opacity: 0.5, max_zoom: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub radius: u32,
    pub fill_opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self { radius: 4, fill_opacity: 0.8 }
    }
}

/// Map view settings handed to the map renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub zoom_start: u32,
    pub width: u32,
    pub height: u32,
    pub tiles: TileLayer,
    pub heat: HeatStyle,
    pub marker: MarkerStyle,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            zoom_start: 14,
            width: 1000,
            height: 600,
            tiles: TileLayer::default(),
            heat: HeatStyle::default(),
            marker: MarkerStyle::default(),
        }
    }
}

/// Histogram image settings. Colours are RGB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistogramStyle {
    pub width: u32,
    pub height: u32,
    pub bar: [u8; 3],
    pub edge: [u8; 3],
}

impl Default for HistogramStyle {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            bar: [135, 206, 235], // skyblue
            edge: [0, 0, 0],
        }
    }
}

/// Full render configuration. Any subset may be given in a JSON file; the
/// rest keeps its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub map: MapStyle,
    pub histogram: HistogramStyle,
}

impl RenderConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}
