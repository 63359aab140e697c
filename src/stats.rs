use crate::models::DeltaPoint;
use serde::{Deserialize, Serialize};

/// Summary statistics for a delta series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    /// Sum of all deltas, i.e. growth of the cumulative count over the window.
    pub total: i64,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub median: f64,
    /// Day with the largest delta (earliest on ties).
    pub peak: DeltaPoint,
}

/// Compute summary statistics; `None` for an empty series.
pub fn summary(points: &[DeltaPoint]) -> Option<Summary> {
    let peak = *points
        .iter()
        .reduce(|best, p| if p.value > best.value { p } else { best })?;

    let mut vals: Vec<i64> = points.iter().map(|p| p.value).collect();
    vals.sort_unstable();
    let count = vals.len();
    let total: i64 = vals.iter().fold(0i64, |acc, v| acc.saturating_add(*v));
    let mean = vals.iter().map(|v| *v as f64).sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        vals[count / 2] as f64
    } else {
        (vals[count / 2 - 1] as f64 + vals[count / 2] as f64) / 2.0
    };

    Some(Summary {
        count,
        total,
        min: vals[0],
        max: vals[count - 1],
        mean,
        median,
        peak,
    })
}
