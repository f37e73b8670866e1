//! Distribution summary of the raw readings.
//!
//! Histogram binning and summary statistics over the flat reading list,
//! independent of subgrouping. Deterministic for a given reading set and
//! bin-count rule — no randomness.

use serde::{Deserialize, Serialize};

use crate::input::SpecLimits;
use crate::stats;

/// Bin-count rule for the histogram.
///
/// Both rules are statistically defensible; Sturges is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinMethod {
    /// Sturges' rule: k = ⌈log2(n)⌉ + 1.
    #[default]
    Sturges,
    /// Square-root rule: k = ⌈√n⌉.
    SquareRoot,
}

impl BinMethod {
    /// Bin count for `n` data points, at least 1.
    fn bin_count(self, n: usize) -> usize {
        let nf = n as f64;
        let k = match self {
            BinMethod::Sturges => nf.log2().ceil() as usize + 1,
            BinMethod::SquareRoot => nf.sqrt().ceil() as usize,
        };
        k.max(1)
    }
}

/// A histogram bin plotted as (bin center, count).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinPoint {
    /// Bin center.
    #[serde(rename = "x")]
    pub center: f64,
    /// Number of readings falling in the bin.
    #[serde(rename = "y")]
    pub count: usize,
}

/// Histogram plus summary statistics over the raw readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSummary {
    /// Per-bin (center, count) points in ascending bin order.
    pub points: Vec<BinPoint>,
    /// Bin edges, length = bin count + 1.
    pub bin_edges: Vec<f64>,
    /// Smallest reading.
    pub min: f64,
    /// Largest reading.
    pub max: f64,
    /// Mean of the raw readings.
    pub mean: f64,
    /// Sample standard deviation of the raw readings.
    pub std_dev: f64,
    /// Target value, echoed for overlaying on the histogram.
    pub target: f64,
}

/// Bin the readings over [min, max] with evenly spaced edges.
///
/// Degenerate data (all readings equal) yields a single bin holding every
/// reading. The caller guarantees a non-empty, finite reading list.
pub fn build_distribution(
    values: &[f64],
    spec: SpecLimits,
    method: BinMethod,
) -> DistributionSummary {
    debug_assert!(!values.is_empty());

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean = stats::mean(values).unwrap_or(0.0);
    let std_dev = stats::sample_std_dev(values).unwrap_or(0.0);

    let range = max - min;
    let n_bins = if range > 0.0 {
        method.bin_count(values.len())
    } else {
        1
    };
    let bin_width = if range > 0.0 { range / n_bins as f64 } else { 0.0 };

    let mut bin_edges = Vec::with_capacity(n_bins + 1);
    for i in 0..=n_bins {
        bin_edges.push(min + i as f64 * bin_width);
    }

    let mut counts = vec![0usize; n_bins];
    for &x in values {
        let bin = if bin_width > 0.0 {
            // The maximum reading lands in the last bin.
            (((x - min) / bin_width).floor() as usize).min(n_bins - 1)
        } else {
            0
        };
        counts[bin] += 1;
    }

    let points = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| BinPoint {
            center: min + (i as f64 + 0.5) * bin_width,
            count,
        })
        .collect();

    DistributionSummary {
        points,
        bin_edges,
        min,
        max,
        mean,
        std_dev,
        target: spec.target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spec() -> SpecLimits {
        SpecLimits::new(0.0, 10.0, 5.0).unwrap()
    }

    #[test]
    fn test_sturges_bin_count() {
        assert_eq!(BinMethod::Sturges.bin_count(8), 4);
        assert_eq!(BinMethod::Sturges.bin_count(100), 8);
        assert_eq!(BinMethod::SquareRoot.bin_count(100), 10);
        assert_eq!(BinMethod::SquareRoot.bin_count(50), 8);
    }

    #[test]
    fn test_counts_cover_all_readings() {
        let values = [1.0, 2.0, 2.5, 3.0, 4.0, 4.5, 5.0, 9.0];
        let dist = build_distribution(&values, spec(), BinMethod::Sturges);
        let total: usize = dist.points.iter().map(|p| p.count).sum();
        assert_eq!(total, values.len());
        assert_eq!(dist.bin_edges.len(), dist.points.len() + 1);
    }

    #[test]
    fn test_max_reading_lands_in_last_bin() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0];
        let dist = build_distribution(&values, spec(), BinMethod::SquareRoot);
        assert!(dist.points.last().unwrap().count >= 1);
        assert_relative_eq!(dist.max, 4.0);
        assert_relative_eq!(*dist.bin_edges.last().unwrap(), 4.0);
    }

    #[test]
    fn test_summary_statistics() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let dist = build_distribution(&values, spec(), BinMethod::Sturges);
        assert_relative_eq!(dist.mean, 5.0);
        assert_relative_eq!(dist.std_dev, (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(dist.min, 2.0);
        assert_relative_eq!(dist.max, 9.0);
        assert_relative_eq!(dist.target, 5.0);
    }

    #[test]
    fn test_constant_data_single_bin() {
        let values = [5.0; 10];
        let dist = build_distribution(&values, spec(), BinMethod::Sturges);
        assert_eq!(dist.points.len(), 1);
        assert_eq!(dist.points[0].count, 10);
        assert_relative_eq!(dist.std_dev, 0.0);
    }

    #[test]
    fn test_deterministic() {
        let values = [1.0, 3.0, 2.0, 5.0, 4.0, 2.5, 3.5, 1.5];
        let a = build_distribution(&values, spec(), BinMethod::Sturges);
        let b = build_distribution(&values, spec(), BinMethod::Sturges);
        assert_eq!(a, b);
    }
}
