//! Error types for the RF heatmap engine.
//!
//! `Error` halts the current pipeline run. `Degraded` is reported alongside a
//! partial result: the run continues and renders whatever is still valid.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid schema: missing {}", .missing.join(", "))]
    InvalidSchema { missing: Vec<&'static str> },

    #[error("unknown metric column: {0}")]
    UnknownMetric(String),

    #[error("table read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Conditions that degrade a run without halting it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Degraded {
    #[error("no rows left after filtering; summary statistics are undefined")]
    EmptyWorkingSet,

    #[error("no valid Latitude/Longitude in the filtered data; map skipped")]
    NoGeography,

    #[error("metric {0} has no quality tiers; falling back to the full value range")]
    UnclassifiedMetric(String),
}
