//! Summary statistics and the value distribution of the filtered set.

use std::fmt;

use serde::Serialize;

use crate::error::Degraded;
use crate::record::WorkingSet;

/// Fixed number of equal-width histogram bins.
pub const HISTOGRAM_BINS: usize = 20;

/// Equal-width histogram. `edges` has one more entry than `counts`; every bin
/// is half-open except the last, which also takes values equal to the top edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` across their own [min, max]. A zero-width span is widened
    /// to [v − 0.5, v + 0.5]. None for an empty input.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }
        let mut lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = hi / bins as f64 - lo / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            let bin = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[bin] += 1;
        }
        Some(Self { edges, counts })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Count, mean and extremes of the selected metric, plus its histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub histogram: Histogram,
}

impl Summary {
    /// Values rounded to two decimals, as shown to the user.
    pub fn rounded(&self) -> Summary {
        Summary {
            mean: round2(self.mean),
            max: round2(self.max),
            min: round2(self.min),
            ..self.clone()
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={} mean={:.2} max={:.2} min={:.2}", self.count, self.mean, self.max, self.min)
    }
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Summarise `column` over `set`. An empty set has no mean or extremes and is
/// reported as `Degraded::EmptyWorkingSet`.
pub fn summarize(set: &WorkingSet<'_>, column: usize) -> Result<Summary, Degraded> {
    let values: Vec<f64> = set.values(column).collect();
    let histogram = Histogram::from_values(&values, HISTOGRAM_BINS).ok_or(Degraded::EmptyWorkingSet)?;

    let count = values.len();
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    // Scale before summing so values near f64::MAX cannot overflow the total.
    let n = count as f64;
    let mean = values.iter().map(|v| v / n).sum::<f64>().clamp(min, max);

    Ok(Summary { count, mean, max, min, histogram })
}
