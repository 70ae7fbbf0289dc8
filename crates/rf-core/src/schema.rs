//! Schema validation: locate coordinate, PLMN and metric columns by name.
//!
//! Names are compared trimmed and case-insensitively through a lookup built
//! once from the header row. The first column with a given name wins.

use std::collections::HashMap;

use serde::Serialize;

use crate::classify::Metric;
use crate::error::{Error, Result};

pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const PLMN: &str = "PLMN";
const ANY_METRIC: &str = "RF metric (RSRP, RSSI, RSRQ or SINR)";

/// Case-insensitive header → column position.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    by_name: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn new(headers: &[String]) -> Self {
        let mut by_name = HashMap::with_capacity(headers.len());
        for (i, h) in headers.iter().enumerate() {
            by_name.entry(normalize(h)).or_insert(i);
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.by_name.get(&normalize(name)).copied()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

/// A source column holding a recognised metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricColumn {
    /// Header text as it appears in the source, trimmed.
    pub name: String,
    pub metric: Metric,
    /// Position in the source table.
    pub source: usize,
}

/// Validated column layout of an input table.
#[derive(Debug, Clone)]
pub struct Schema {
    pub latitude: usize,
    pub longitude: usize,
    pub plmn: Option<usize>,
    /// Recognised metric columns in source order.
    pub metrics: Vec<MetricColumn>,
    index: ColumnIndex,
}

impl Schema {
    /// Require Latitude, Longitude and at least one metric column.
    pub fn validate(headers: &[String]) -> Result<Self> {
        let index = ColumnIndex::new(headers);
        let latitude = index.get(LATITUDE);
        let longitude = index.get(LONGITUDE);
        let metrics: Vec<MetricColumn> = headers
            .iter()
            .enumerate()
            .filter_map(|(source, h)| {
                Metric::from_name(h).map(|metric| MetricColumn { name: h.trim().to_string(), metric, source })
            })
            .collect();

        let missing: Vec<&'static str> = [
            latitude.is_none().then_some(LATITUDE),
            longitude.is_none().then_some(LONGITUDE),
            metrics.is_empty().then_some(ANY_METRIC),
        ]
        .into_iter()
        .flatten()
        .collect();

        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) if missing.is_empty() => {
                let plmn = index.get(PLMN);
                tracing::debug!(metrics = metrics.len(), has_plmn = plmn.is_some(), "schema validated");
                Ok(Self { latitude, longitude, plmn, metrics, index })
            }
            _ => Err(Error::InvalidSchema { missing }),
        }
    }

    /// Position within `metrics` of the metric column called `name`.
    pub fn metric_column(&self, name: &str) -> Option<usize> {
        let source = self.index.get(name)?;
        self.metrics.iter().position(|m| m.source == source)
    }

    pub fn metric_names(&self) -> Vec<String> {
        self.metrics.iter().map(|m| m.name.clone()).collect()
    }
}
