//! RF measurement classification and filtering engine.
//!
//! Takes a table of geotagged signal measurements (RSRP, RSSI, RSRQ, SINR),
//! validates it, filters it by network and value range, and produces the
//! summary, histogram and map layers a visualisation front end draws.

pub mod classify;
pub mod config;
pub mod coords;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod plmn;
pub mod record;
pub mod schema;
pub mod spatial;
pub mod summary;
pub mod table;

pub use classify::{get_color, Classifier, Metric, PresetTable, SignalColor, Tier};
pub use config::{HistogramStyle, MapStyle, RenderConfig};
pub use coords::LatLon;
pub use error::{Degraded, Error, Result};
pub use filter::{filter_range, Selection, ValueRange};
pub use pipeline::{control_options, run, ControlOptions, ViewReport, ViewRequest};
pub use plmn::PlmnFilter;
pub use record::{Dataset, MeasurementRecord, WorkingSet};
pub use schema::Schema;
pub use spatial::{build_layers, HeatPoint, MapLayers, Marker};
pub use summary::{summarize, Histogram, Summary, HISTOGRAM_BINS};
pub use table::RawTable;
