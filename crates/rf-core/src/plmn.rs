//! Optional network-identifier filter.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{Dataset, WorkingSet};

/// Sentinel offered ahead of the concrete PLMN values.
pub const ALL: &str = "All";

/// PLMN selection. Serialised as the bare string, `"All"` for no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlmnFilter {
    #[default]
    All,
    Only(String),
}

impl From<String> for PlmnFilter {
    fn from(s: String) -> Self {
        if s == ALL {
            PlmnFilter::All
        } else {
            PlmnFilter::Only(s)
        }
    }
}

impl From<PlmnFilter> for String {
    fn from(f: PlmnFilter) -> Self {
        match f {
            PlmnFilter::All => ALL.to_string(),
            PlmnFilter::Only(s) => s,
        }
    }
}

impl fmt::Display for PlmnFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlmnFilter::All => f.write_str(ALL),
            PlmnFilter::Only(s) => f.write_str(s),
        }
    }
}

/// Choices for the PLMN selector: `"All"` followed by the distinct values in
/// ascending order. None when the table has no PLMN column.
///
/// A literal `"All"` value in the data is left out: choosing it would be read
/// back as the sentinel and select every row.
pub fn plmn_options(dataset: &Dataset) -> Option<Vec<String>> {
    dataset.schema().plmn?;
    let mut distinct: BTreeSet<&str> = dataset.records().iter().filter_map(|r| r.plmn.as_deref()).collect();
    if distinct.remove(ALL) {
        tracing::warn!(value = ALL, "PLMN value collides with the no-filter choice; not offered");
    }
    let mut options = Vec::with_capacity(distinct.len() + 1);
    options.push(ALL.to_string());
    options.extend(distinct.into_iter().map(str::to_string));
    Some(options)
}

/// Restrict to rows whose PLMN equals the selection. A no-op for `All` or when
/// the table has no PLMN column.
pub fn apply<'a>(set: WorkingSet<'a>, filter: &PlmnFilter) -> WorkingSet<'a> {
    let PlmnFilter::Only(wanted) = filter else {
        return set;
    };
    if set.dataset().schema().plmn.is_none() {
        tracing::debug!(plmn = %wanted, "no PLMN column; filter ignored");
        return set;
    }
    let before = set.len();
    let set = set.retain(|r| r.plmn.as_deref() == Some(wanted.as_str()));
    tracing::debug!(plmn = %wanted, before, after = set.len(), "PLMN filter applied");
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH_PLMN: &str = "Latitude,Longitude,RSRP,plmn\n\
                             1,1,-80,310410\n\
                             2,2,-90,310260\n\
                             3,3,-100,\n\
                             4,4,-110,310260\n";

    #[test]
    fn options_are_sorted_and_start_with_all() {
        let ds = Dataset::from_csv_str(WITH_PLMN).unwrap();
        assert_eq!(plmn_options(&ds).unwrap(), vec!["All", "310260", "310410"]);
    }

    #[test]
    fn literal_all_value_is_not_offered_twice() {
        let ds = Dataset::from_csv_str("Latitude,Longitude,RSRP,PLMN\n1,1,-80,All\n2,2,-90,310260\n").unwrap();
        let options = plmn_options(&ds).unwrap();
        assert_eq!(options, vec!["All", "310260"]);
        for choice in options.iter().skip(1) {
            assert!(matches!(PlmnFilter::from(choice.clone()), PlmnFilter::Only(_)), "{choice}");
        }
    }

    #[test]
    fn selecting_a_value_keeps_matching_rows() {
        let ds = Dataset::from_csv_str(WITH_PLMN).unwrap();
        let set = apply(ds.working_set(), &PlmnFilter::Only("310260".into()));
        assert_eq!(set.rows(), &[1, 3]);
    }

    #[test]
    fn all_is_a_no_op() {
        let ds = Dataset::from_csv_str(WITH_PLMN).unwrap();
        assert_eq!(apply(ds.working_set(), &PlmnFilter::All), ds.working_set());
    }

    #[test]
    fn no_plmn_column_is_a_no_op() {
        let ds = Dataset::from_csv_str("Latitude,Longitude,RSRP\n1,1,-80\n2,2,-90\n").unwrap();
        assert!(plmn_options(&ds).is_none());
        let set = apply(ds.working_set(), &PlmnFilter::Only("310260".into()));
        assert_eq!(set, ds.working_set());
    }

    #[test]
    fn filter_round_trips_through_json_as_plain_string() {
        let f: PlmnFilter = serde_json::from_str("\"All\"").unwrap();
        assert_eq!(f, PlmnFilter::All);
        let f: PlmnFilter = serde_json::from_str("\"310260\"").unwrap();
        assert_eq!(serde_json::to_string(&f).unwrap(), "\"310260\"");
    }
}
