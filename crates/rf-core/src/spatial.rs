//! Spatial point builder: heat points and coloured markers for the map.

use serde::{Serialize, Serializer};

use crate::classify::{Classifier, SignalColor};
use crate::coords::LatLon;
use crate::error::Degraded;
use crate::record::WorkingSet;

/// Weighted heat-layer point. Serialised as `[lat, lon, weight]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPoint {
    pub location: LatLon,
    pub weight: f64,
}

impl Serialize for HeatPoint {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        [self.location.lat, self.location.lon, self.weight].serialize(s)
    }
}

/// Discrete circle marker with its hover text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub location: LatLon,
    pub color: SignalColor,
    pub tooltip: String,
}

/// Everything the map renderer needs from the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayers {
    /// Mean of all valid coordinates.
    pub center: LatLon,
    pub heat: Vec<HeatPoint>,
    pub markers: Vec<Marker>,
}

/// Build heat points and markers for every row with coordinates and a value.
/// `label` prefixes the tooltip, e.g. `"RSRP: -75.00"`.
pub fn build_layers(
    set: &WorkingSet<'_>,
    column: usize,
    label: &str,
    classifier: &Classifier,
) -> Result<MapLayers, Degraded> {
    let points: Vec<(LatLon, f64)> = set
        .iter()
        .filter_map(|r| Some((r.coords()?, r.metric(column)?)))
        .collect();

    let center = LatLon::centroid(points.iter().map(|&(p, _)| p)).ok_or(Degraded::NoGeography)?;

    let heat = points
        .iter()
        .map(|&(location, weight)| HeatPoint { location, weight })
        .collect();
    let markers = points
        .iter()
        .map(|&(location, value)| Marker {
            location,
            color: classifier.color(value),
            tooltip: format!("{label}: {value:.2}"),
        })
        .collect();

    tracing::debug!(points = points.len(), lat = center.lat, lon = center.lon, "map layers built");
    Ok(MapLayers { center, heat, markers })
}
