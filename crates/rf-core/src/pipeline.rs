//! Per-interaction pipeline: runs every stage in order over one dataset.
//!
//! Each run starts from the immutable `Dataset` and recomputes all derived
//! state, so the result depends only on the dataset and the request.

use serde::{Deserialize, Serialize};

use crate::classify::{Classifier, PresetTable};
use crate::error::{Degraded, Error, Result};
use crate::filter::{filter_range, Selection, ValueRange};
use crate::plmn::{self, PlmnFilter};
use crate::record::Dataset;
use crate::spatial::{build_layers, MapLayers};
use crate::summary::{summarize, Summary};

// ── Request / report ──────────────────────────────────────────────────────────

/// The user's current choices on the control surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewRequest {
    pub plmn: PlmnFilter,
    /// Metric column name; None selects the first metric column.
    pub metric: Option<String>,
    pub selection: Selection,
}

/// Options the control surface should offer for a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlOptions {
    /// Recognised metric columns in source order; the first is the default.
    pub metrics: Vec<String>,
    /// `"All"` plus the sorted PLMN values; None without a PLMN column.
    pub plmns: Option<Vec<String>>,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewReport {
    pub metric: String,
    pub options: ControlOptions,
    /// Observed range of the metric after the PLMN filter: slider extent.
    pub bounds: Option<ValueRange>,
    pub presets: Option<PresetTable>,
    /// Interval actually applied.
    pub range: Option<ValueRange>,
    /// Rows inside the applied interval.
    pub count: usize,
    pub summary: Option<Summary>,
    pub layers: Option<MapLayers>,
    pub warnings: Vec<Degraded>,
}

impl ViewReport {
    pub fn status_line(&self) -> String {
        format!("{} data points within selected range.", self.count)
    }
}

pub fn control_options(dataset: &Dataset) -> ControlOptions {
    ControlOptions {
        metrics: dataset.schema().metric_names(),
        plmns: plmn::plmn_options(dataset),
    }
}

// ── Orchestrator ──────────────────────────────────────────────────────────────

/// Run the pipeline for `request`.
///
/// Stage order:
///   1. PLMN filter
///   2. Drop rows missing coordinates or the selected metric
///   3. Classifier presets from the observed range
///   4. Range filter
///   5. Summary and map layers over the same filtered set
///
/// Errors only when the request names a metric column the dataset lacks;
/// everything else degrades into `warnings`.
pub fn run(dataset: &Dataset, request: &ViewRequest) -> Result<ViewReport> {
    let schema = dataset.schema();
    let column = match request.metric.as_deref() {
        Some(name) => schema.metric_column(name).ok_or_else(|| Error::UnknownMetric(name.to_string()))?,
        None => 0,
    };
    let metric_col = &schema.metrics[column];
    let label = metric_col.name.clone();
    let _span = tracing::debug_span!("view", metric = %label, plmn = %request.plmn).entered();

    let mut warnings = Vec::new();

    // ── 1. PLMN filter ──────────────────────────────────────────────────────
    let set = plmn::apply(dataset.working_set(), &request.plmn);

    // ── 2. Usable rows ──────────────────────────────────────────────────────
    let set = set.usable(column);
    let bounds = ValueRange::observed(set.values(column));

    // ── 3. Classifier ───────────────────────────────────────────────────────
    let classifier = Classifier::new(Some(metric_col.metric));
    let presets = bounds.and_then(|b| classifier.presets(b));

    // ── 4. Range filter ─────────────────────────────────────────────────────
    let range = bounds.map(|b| {
        let (range, fell_back) = request.selection.resolve(b, presets.as_ref());
        if fell_back {
            tracing::warn!(metric = %label, "no tier presets for metric; using full range");
            warnings.push(Degraded::UnclassifiedMetric(label.clone()));
        }
        range
    });
    let filtered = match range {
        Some(r) => filter_range(set, column, r),
        None => set,
    };

    // ── 5. Consumers ────────────────────────────────────────────────────────
    let summary = summarize(&filtered, column)
        .map_err(|w| warnings.push(w))
        .ok();
    let layers = build_layers(&filtered, column, &label, &classifier)
        .map_err(|w| warnings.push(w))
        .ok();

    for w in &warnings {
        tracing::warn!("{w}");
    }
    tracing::info!(count = filtered.len(), "view computed");

    Ok(ViewReport {
        metric: label,
        options: control_options(dataset),
        bounds,
        presets,
        range,
        count: filtered.len(),
        summary,
        layers,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{SignalColor, Tier};
    use approx::assert_abs_diff_eq;

    const SCENARIO: &str = "Latitude,Longitude,RSRP,SINR,PLMN\n\
                            1.0,1.0,-75,22,310260\n\
                            2.0,2.0,-95,5,310410\n\
                            3.0,3.0,-105,-2,310260\n";

    fn request(metric: Option<&str>, selection: Selection) -> ViewRequest {
        ViewRequest { plmn: PlmnFilter::All, metric: metric.map(str::to_string), selection }
    }

    #[test]
    fn scenario_excellent_keeps_strong_row() {
        let ds = Dataset::from_csv_str(SCENARIO).unwrap();
        let report = run(&ds, &request(Some("RSRP"), Selection::Preset { tier: Tier::Excellent })).unwrap();
        assert_eq!(report.count, 1);
        let layers = report.layers.unwrap();
        assert_eq!(layers.markers[0].color, SignalColor::Green);
        assert_eq!(layers.markers[0].tooltip, "RSRP: -75.00");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn scenario_good_preset_is_empty_and_degrades() {
        let ds = Dataset::from_csv_str(SCENARIO).unwrap();
        let report = run(&ds, &request(Some("rsrp"), Selection::Preset { tier: Tier::Good })).unwrap();
        assert_eq!(report.range, Some(ValueRange::new(-90.0, -80.0)));
        assert_eq!(report.count, 0);
        assert!(report.summary.is_none());
        assert!(report.layers.is_none());
        assert_eq!(report.warnings, vec![Degraded::EmptyWorkingSet, Degraded::NoGeography]);
    }

    #[test]
    fn default_request_uses_first_metric_and_full_range() {
        let ds = Dataset::from_csv_str(SCENARIO).unwrap();
        let report = run(&ds, &ViewRequest::default()).unwrap();
        assert_eq!(report.metric, "RSRP");
        assert_eq!(report.bounds, Some(ValueRange::new(-105.0, -75.0)));
        assert_eq!(report.count, 3);
        assert_eq!(report.status_line(), "3 data points within selected range.");
        let s = report.summary.as_ref().unwrap();
        assert_abs_diff_eq!(s.mean, -91.666_666, epsilon = 1e-5);
        assert_eq!(report.options.plmns.as_deref().unwrap(), ["All", "310260", "310410"]);
    }

    #[test]
    fn plmn_filter_narrows_bounds_and_presets() {
        let ds = Dataset::from_csv_str(SCENARIO).unwrap();
        let req = ViewRequest {
            plmn: PlmnFilter::Only("310260".into()),
            metric: Some("SINR".into()),
            selection: Selection::Manual { lo: -5.0, hi: 30.0 },
        };
        let report = run(&ds, &req).unwrap();
        assert_eq!(report.bounds, Some(ValueRange::new(-2.0, 22.0)));
        assert_eq!(report.presets.unwrap().excellent, ValueRange::new(20.0, 22.0));
        assert_eq!(report.count, 2);
    }

    #[test]
    fn unknown_metric_column_halts() {
        let ds = Dataset::from_csv_str(SCENARIO).unwrap();
        let err = run(&ds, &request(Some("RSSI"), Selection::All)).unwrap_err();
        assert!(matches!(err, Error::UnknownMetric(ref m) if m == "RSSI"));
    }

    #[test]
    fn no_usable_rows_reports_empty_without_bounds() {
        let ds = Dataset::from_csv_str("Latitude,Longitude,RSRQ\n,,-12\n1,1,\n").unwrap();
        let report = run(&ds, &ViewRequest::default()).unwrap();
        assert!(report.bounds.is_none());
        assert!(report.presets.is_none());
        assert_eq!(report.count, 0);
        assert!(report.warnings.contains(&Degraded::EmptyWorkingSet));
        assert!(report.warnings.contains(&Degraded::NoGeography));
    }

    #[test]
    fn request_reads_from_json() {
        let req: ViewRequest =
            serde_json::from_str(r#"{"plmn":"310410","selection":{"kind":"preset","tier":"Fair"}}"#).unwrap();
        assert_eq!(req.plmn, PlmnFilter::Only("310410".into()));
        assert_eq!(req.metric, None);
        assert_eq!(req.selection, Selection::Preset { tier: Tier::Fair });
    }
}
