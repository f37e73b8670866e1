//! Special-cause run rules over ordered chart points.
//!
//! Western-Electric-style tests applied once, left to right, to the X-bar
//! point sequence (rule set A) and the R point sequence (rule set B) relative
//! to their control limits and center lines:
//!
//! - points strictly beyond UCL/LCL (a point exactly on a limit is in control)
//! - >= 8 consecutive points on one side of the center line
//! - >= 6 consecutive points strictly increasing or decreasing
//! - process shift: an 8-point run whose level departs from the pre-run
//!   baseline by more than one chart sigma
//! - process spread: R points beyond limits or trending
//!
//! The detector is a pure function of the ordered points and limits; no
//! per-rule state persists between analysis requests.
//!
//! # References
//!
//! - Western Electric (1956). *Statistical Quality Control Handbook*.
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special Causes",
//!   *Journal of Quality Technology* 16(4), pp. 237-239.

use serde::{Deserialize, Serialize};

use super::control::{ChartPoint, ControlChartResult};

/// Minimum run length for the same-side rule.
const SAME_SIDE_RUN: usize = 8;

/// Minimum run length for the trend rule.
const TREND_RUN: usize = 6;

/// Per-rule verdicts plus the aggregate.
///
/// Counts are numbers of flagged points; booleans are rule verdicts over the
/// whole sequence. On the wire the dashboard contract is textual, so the
/// struct serializes through an internal adapter: booleans become
/// "Yes"/"No" and counts become digit strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SpecialCauseReport", from = "SpecialCauseReport")]
pub struct SpecialCauseFlags {
    /// X-bar points strictly beyond the X-bar control limits.
    pub points_outside_limits: usize,
    /// R points strictly beyond the R control limits.
    pub range_points_outside_limits: usize,
    /// >= 8 consecutive X-bar points on one side of the center line.
    pub eight_consecutive_points: bool,
    /// >= 6 consecutive X-bar points strictly increasing or decreasing.
    pub six_consecutive_trend: bool,
    /// Sustained level change: an 8-point run departing from its baseline.
    pub process_shift: bool,
    /// Variance change: R points beyond limits or trending.
    pub process_spread: bool,
    /// Aggregate OR of all rules above.
    pub special_cause_present: bool,
}

/// Wire form of [`SpecialCauseFlags`], matching the legacy dashboard
/// contract: every verdict is a string ("Yes"/"No" for rule verdicts,
/// digit strings for counts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpecialCauseReport {
    points_outside_limits: String,
    range_points_outside_limits: String,
    eight_consecutive_points: String,
    six_consecutive_trend: String,
    process_shift: String,
    process_spread: String,
    special_cause_present: String,
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

impl From<SpecialCauseFlags> for SpecialCauseReport {
    fn from(flags: SpecialCauseFlags) -> Self {
        Self {
            points_outside_limits: flags.points_outside_limits.to_string(),
            range_points_outside_limits: flags.range_points_outside_limits.to_string(),
            eight_consecutive_points: yes_no(flags.eight_consecutive_points),
            six_consecutive_trend: yes_no(flags.six_consecutive_trend),
            process_shift: yes_no(flags.process_shift),
            process_spread: yes_no(flags.process_spread),
            special_cause_present: yes_no(flags.special_cause_present),
        }
    }
}

impl From<SpecialCauseReport> for SpecialCauseFlags {
    fn from(report: SpecialCauseReport) -> Self {
        Self {
            points_outside_limits: report.points_outside_limits.parse().unwrap_or(0),
            range_points_outside_limits: report.range_points_outside_limits.parse().unwrap_or(0),
            eight_consecutive_points: report.eight_consecutive_points == "Yes",
            six_consecutive_trend: report.six_consecutive_trend == "Yes",
            process_shift: report.process_shift == "Yes",
            process_spread: report.process_spread == "Yes",
            special_cause_present: report.special_cause_present == "Yes",
        }
    }
}

/// Scan both chart sequences for special-cause patterns.
pub fn detect_special_causes(chart: &ControlChartResult) -> SpecialCauseFlags {
    let limits = &chart.limits;

    let points_outside_limits =
        count_outside(&chart.x_bar_points, limits.x_bar_ucl, limits.x_bar_lcl);
    let range_points_outside_limits =
        count_outside(&chart.range_points, limits.range_ucl, limits.range_lcl);

    let runs = same_side_runs(&chart.x_bar_points, limits.x_bar_mean, SAME_SIDE_RUN);
    let eight_consecutive_points = !runs.is_empty();

    let x_bar_values: Vec<f64> = chart.x_bar_points.iter().map(|p| p.value).collect();
    let six_consecutive_trend = has_monotone_run(&x_bar_values, TREND_RUN);

    // One chart sigma, from the 3-sigma limit spread.
    let sigma = (limits.x_bar_ucl - limits.x_bar_mean) / 3.0;
    let process_shift = runs
        .iter()
        .any(|run| run_shifts_baseline(&x_bar_values, run, sigma));

    let range_values: Vec<f64> = chart.range_points.iter().map(|p| p.value).collect();
    let process_spread =
        range_points_outside_limits > 0 || has_monotone_run(&range_values, TREND_RUN);

    let special_cause_present = points_outside_limits > 0
        || range_points_outside_limits > 0
        || eight_consecutive_points
        || six_consecutive_trend
        || process_shift
        || process_spread;

    SpecialCauseFlags {
        points_outside_limits,
        range_points_outside_limits,
        eight_consecutive_points,
        six_consecutive_trend,
        process_shift,
        process_spread,
        special_cause_present,
    }
}

/// Count points strictly beyond the limits. Ties are in control.
fn count_outside(points: &[ChartPoint], ucl: f64, lcl: f64) -> usize {
    points
        .iter()
        .filter(|p| p.value > ucl || p.value < lcl)
        .count()
}

/// A maximal run of consecutive points on one side of the center line,
/// as positions into the point sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    start: usize,
    /// Exclusive end.
    end: usize,
}

/// Find maximal runs of at least `min_len` consecutive points strictly on one
/// side of the center line. A point exactly on the line breaks the run.
fn same_side_runs(points: &[ChartPoint], center: f64, min_len: usize) -> Vec<Run> {
    // +1 above, -1 below, 0 on the line (neither side).
    let sides: Vec<i8> = points
        .iter()
        .map(|p| {
            if p.value > center {
                1
            } else if p.value < center {
                -1
            } else {
                0
            }
        })
        .collect();

    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=sides.len() {
        let broken = i == sides.len() || sides[i] == 0 || sides[i] != sides[start];
        if broken {
            if sides.get(start).copied().unwrap_or(0) != 0 && i - start >= min_len {
                runs.push(Run { start, end: i });
            }
            start = i;
        }
    }
    runs
}

/// True when `values` contains `min_len` consecutive strictly increasing or
/// strictly decreasing points. Equal neighbors break a trend.
fn has_monotone_run(values: &[f64], min_len: usize) -> bool {
    if values.len() < min_len || min_len < 2 {
        return false;
    }

    // Direction of each step: +1 up, -1 down, 0 flat.
    let dirs: Vec<i8> = values
        .windows(2)
        .map(|w| {
            if w[1] > w[0] {
                1
            } else if w[1] < w[0] {
                -1
            } else {
                0
            }
        })
        .collect();

    // min_len points form min_len - 1 same-direction steps.
    let needed = min_len - 1;
    let mut run_length = 0usize;
    for i in 0..dirs.len() {
        if dirs[i] != 0 && (i == 0 || dirs[i] == dirs[i - 1] || run_length == 0) {
            run_length += 1;
        } else if dirs[i] != 0 {
            run_length = 1;
        } else {
            run_length = 0;
        }
        if run_length >= needed {
            return true;
        }
    }
    false
}

/// True when the run's mean level departs from the mean of the points that
/// precede it by more than one chart sigma. A run with no preceding baseline
/// cannot establish a level change.
fn run_shifts_baseline(values: &[f64], run: &Run, sigma: f64) -> bool {
    if run.start == 0 {
        return false;
    }
    let baseline = values[..run.start].iter().sum::<f64>() / run.start as f64;
    let run_slice = &values[run.start..run.end];
    let run_mean = run_slice.iter().sum::<f64>() / run_slice.len() as f64;
    (run_mean - baseline).abs() > sigma
}
