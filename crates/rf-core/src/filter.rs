//! Range filter on the selected metric.
//!
//! Presets resolve through the classifier's table but are applied as closed
//! intervals, so a value sitting exactly on a tier floor passes both the tier
//! above and the tier below it.

use serde::{Deserialize, Serialize};

use crate::classify::{PresetTable, Tier};
use crate::record::WorkingSet;

/// Closed numeric interval `[lo, hi]`. An inverted interval contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub lo: f64,
    pub hi: f64,
}

impl ValueRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        self.lo <= v && v <= self.hi
    }

    /// Observed [min, max] of `values`. None when there are none.
    pub fn observed<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let (lo, hi) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        (lo <= hi).then(|| Self::new(lo, hi))
    }
}

/// What the user picked on the range controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// The full observed range.
    #[default]
    All,
    Preset { tier: Tier },
    Manual { lo: f64, hi: f64 },
}

impl Selection {
    /// Turn the selection into an interval. A preset without a preset table
    /// (unclassified metric) falls back to `bounds`; the bool reports that.
    pub fn resolve(&self, bounds: ValueRange, presets: Option<&PresetTable>) -> (ValueRange, bool) {
        match *self {
            Selection::All => (bounds, false),
            Selection::Preset { tier } => match presets {
                Some(table) => (table.get(tier), false),
                None => (bounds, true),
            },
            Selection::Manual { lo, hi } => (ValueRange::new(lo, hi), false),
        }
    }
}

/// Rows with coordinates and a metric value inside `range`.
pub fn filter_range<'a>(set: WorkingSet<'a>, column: usize, range: ValueRange) -> WorkingSet<'a> {
    let before = set.len();
    let set = set
        .usable(column)
        .retain(|r| r.metric(column).is_some_and(|v| range.contains(v)));
    tracing::debug!(lo = range.lo, hi = range.hi, before, after = set.len(), "range filter applied");
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Classifier, Metric};
    use crate::record::Dataset;
    use proptest::prelude::*;

    const CSV: &str = "Latitude,Longitude,RSRP\n\
                       1.0,1.0,-75\n\
                       2.0,2.0,-95\n\
                       3.0,3.0,-105\n\
                       4.0,4.0,-90\n\
                       5.0,5.0,-80\n\
                       ,6.0,-85\n";

    fn rsrp_presets(ds: &Dataset) -> (ValueRange, PresetTable) {
        let bounds = ValueRange::observed(ds.working_set().usable(0).values(0)).unwrap();
        (bounds, Classifier::new(Some(Metric::Rsrp)).presets(bounds).unwrap())
    }

    #[test]
    fn observed_range_of_nothing_is_none() {
        assert!(ValueRange::observed(std::iter::empty()).is_none());
        assert_eq!(ValueRange::observed([3.0, -1.0, 2.0]), Some(ValueRange::new(-1.0, 3.0)));
    }

    #[test]
    fn excellent_preset_picks_the_strong_row() {
        let ds = Dataset::from_csv_str(CSV).unwrap();
        let (bounds, presets) = rsrp_presets(&ds);
        let (range, fell_back) = Selection::Preset { tier: Tier::Excellent }.resolve(bounds, Some(&presets));
        assert!(!fell_back);
        let set = filter_range(ds.working_set(), 0, range);
        assert_eq!(set.rows(), &[0, 4]);
    }

    #[test]
    fn good_preset_is_inclusive_at_both_floors() {
        let ds = Dataset::from_csv_str(CSV).unwrap();
        let (bounds, presets) = rsrp_presets(&ds);
        let (range, _) = Selection::Preset { tier: Tier::Good }.resolve(bounds, Some(&presets));
        let set = filter_range(ds.working_set(), 0, range);
        // -90 and -80 both sit on a floor; -85 has no latitude.
        assert_eq!(set.rows(), &[3, 4]);
    }

    #[test]
    fn preset_matches_equal_manual_interval() {
        let ds = Dataset::from_csv_str(CSV).unwrap();
        let (bounds, presets) = rsrp_presets(&ds);
        let (preset, _) = Selection::Preset { tier: Tier::Good }.resolve(bounds, Some(&presets));
        let (manual, _) = Selection::Manual { lo: -90.0, hi: -80.0 }.resolve(bounds, Some(&presets));
        assert_eq!(filter_range(ds.working_set(), 0, preset), filter_range(ds.working_set(), 0, manual));
    }

    #[test]
    fn preset_without_table_falls_back_to_bounds() {
        let bounds = ValueRange::new(-10.0, 10.0);
        let (range, fell_back) = Selection::Preset { tier: Tier::Fair }.resolve(bounds, None);
        assert!(fell_back);
        assert_eq!(range, bounds);
    }

    #[test]
    fn inverted_manual_range_selects_nothing() {
        let ds = Dataset::from_csv_str(CSV).unwrap();
        let set = filter_range(ds.working_set(), 0, ValueRange::new(-80.0, -90.0));
        assert!(set.is_empty());
    }

    #[test]
    fn selection_reads_from_json() {
        let s: Selection = serde_json::from_str(r#"{"kind":"preset","tier":"Poor"}"#).unwrap();
        assert_eq!(s, Selection::Preset { tier: Tier::Poor });
        let s: Selection = serde_json::from_str(r#"{"kind":"manual","lo":-100,"hi":-70.5}"#).unwrap();
        assert_eq!(s, Selection::Manual { lo: -100.0, hi: -70.5 });
    }

    proptest! {
        #[test]
        fn range_filter_is_idempotent(
            values in proptest::collection::vec(-130.0f64..-40.0, 0..40),
            a in -130.0f64..-40.0,
            b in -130.0f64..-40.0,
        ) {
            let mut csv = String::from("Latitude,Longitude,RSRP\n");
            for (i, v) in values.iter().enumerate() {
                csv.push_str(&format!("{i},{i},{v}\n"));
            }
            let ds = Dataset::from_csv_str(&csv).unwrap();
            let range = ValueRange::new(a.min(b), a.max(b));
            let once = filter_range(ds.working_set(), 0, range);
            let twice = filter_range(once.clone(), 0, range);
            prop_assert_eq!(once, twice);
        }
    }
}
