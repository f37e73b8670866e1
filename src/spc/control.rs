//! X-bar / Range control limits.
//!
//! Reduces an ordered subgroup sequence to plotted chart points and a single
//! set of control limits:
//!
//! - X-bar chart: CL = grand mean, UCL/LCL = CL ± A2 · R-bar
//! - R chart: CL = R-bar, UCL = D4 · R-bar, LCL = D3 · R-bar
//!
//! For subgroup size 1 the same shape holds with the moving range in place of
//! the subgroup range and A2 = E2 = 2.66 (see [`super::constants`]).
//!
//! R-bar = 0 (zero variation) collapses every limit onto its center line;
//! this is reported as a warning, not an error.

use serde::{Deserialize, Serialize};

use super::constants::ChartConstants;
use super::subgroup::Subgroup;
use crate::error::AnalysisWarning;

/// A plotted point: subgroup index against the subgroup statistic.
///
/// Serialized as `{x, y}` for charting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Subgroup index.
    #[serde(rename = "x")]
    pub index: usize,
    /// Statistic value (mean or range).
    #[serde(rename = "y")]
    pub value: f64,
}

/// Control limits for the paired X-bar and R charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLimits {
    /// X-bar chart upper control limit.
    pub x_bar_ucl: f64,
    /// X-bar chart center line (grand mean).
    pub x_bar_mean: f64,
    /// X-bar chart lower control limit.
    pub x_bar_lcl: f64,
    /// R chart upper control limit.
    pub range_ucl: f64,
    /// R chart center line (R-bar).
    pub range_mean: f64,
    /// R chart lower control limit (always >= 0 since D3 >= 0).
    pub range_lcl: f64,
}

/// Ordered chart points plus their control limits. Computed once per
/// analysis request; immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlChartResult {
    /// Subgroup means in input order.
    #[serde(rename = "xBarData")]
    pub x_bar_points: Vec<ChartPoint>,
    /// Subgroup ranges in input order. For subgroup size 1 the sequence
    /// starts at index 1 (the first reading has no moving range).
    #[serde(rename = "rangeData")]
    pub range_points: Vec<ChartPoint>,
    /// Control limits for both charts.
    pub limits: ChartLimits,
}

/// Compute chart points and control limits from ordered subgroups.
///
/// Returns the chart result and, when R-bar is zero, the
/// [`AnalysisWarning::ZeroRangeVariation`] soft condition.
pub fn compute_control_limits(
    subgroups: &[Subgroup],
    constants: ChartConstants,
) -> (ControlChartResult, Option<AnalysisWarning>) {
    debug_assert!(subgroups.len() >= 2);

    let x_bar_points: Vec<ChartPoint> = subgroups
        .iter()
        .map(|s| ChartPoint {
            index: s.index,
            value: s.mean,
        })
        .collect();

    let range_points: Vec<ChartPoint> = subgroups
        .iter()
        .filter_map(|s| {
            s.range.map(|r| ChartPoint {
                index: s.index,
                value: r,
            })
        })
        .collect();

    let grand_mean =
        x_bar_points.iter().map(|p| p.value).sum::<f64>() / x_bar_points.len() as f64;
    let r_bar = if range_points.is_empty() {
        0.0
    } else {
        range_points.iter().map(|p| p.value).sum::<f64>() / range_points.len() as f64
    };

    let limits = ChartLimits {
        x_bar_ucl: grand_mean + constants.a2 * r_bar,
        x_bar_mean: grand_mean,
        x_bar_lcl: grand_mean - constants.a2 * r_bar,
        range_ucl: constants.d4 * r_bar,
        range_mean: r_bar,
        range_lcl: constants.d3 * r_bar,
    };

    let warning = (r_bar == 0.0).then_some(AnalysisWarning::ZeroRangeVariation);

    (
        ControlChartResult {
            x_bar_points,
            range_points,
            limits,
        },
        warning,
    )
}
