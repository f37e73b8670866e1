//! Process capability and performance indices.
//!
//! Short-term indices (Cp, Cpk) use the within-subgroup sigma estimated from
//! the average range as R-bar / d2; long-term indices (Pp, Ppk) use the
//! sample standard deviation of all raw readings, which captures both
//! within- and between-subgroup variation.
//!
//! Indices are `Option<f64>`: `None` marks an index whose sigma denominator
//! is zero ("not computable"), never Infinity or NaN. When both sigma
//! estimates are zero the whole computation fails.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 8.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality Technology*
//!   18(1), pp. 41-52.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::input::SpecLimits;
use crate::spc::{ChartConstants, ControlChartResult};
use crate::stats;

/// Capability metrics for one analysis request. Derived, immutable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityMetrics {
    /// Grand mean of the subgroup means.
    pub x_bar: f64,
    /// Short-term sigma, R-bar / d2.
    pub std_dev_within: f64,
    /// Long-term sigma, sample standard deviation of the raw readings.
    pub std_dev_overall: f64,
    /// Average subgroup range (average moving range for subgroup size 1).
    pub avg_range: f64,
    /// Cp = (USL − LSL) / (6σ_within). `None` when σ_within is zero.
    pub cp: Option<f64>,
    /// Cpu = (USL − X̄) / (3σ_within).
    pub cpu: Option<f64>,
    /// Cpl = (X̄ − LSL) / (3σ_within).
    pub cpl: Option<f64>,
    /// Cpk = min(Cpu, Cpl).
    pub cpk: Option<f64>,
    /// Pp = (USL − LSL) / (6σ_overall). `None` when σ_overall is zero.
    pub pp: Option<f64>,
    /// Ppu = (USL − X̄) / (3σ_overall).
    pub ppu: Option<f64>,
    /// Ppl = (X̄ − LSL) / (3σ_overall).
    pub ppl: Option<f64>,
    /// Ppk = min(Ppu, Ppl).
    pub ppk: Option<f64>,
    /// Lower specification limit, echoed from the request.
    pub lsl: f64,
    /// Upper specification limit, echoed from the request.
    pub usl: f64,
    /// Target value, echoed from the request.
    pub target: f64,
}

/// Compute the Cp/Cpk and Pp/Ppk families from chart statistics and raw
/// readings.
///
/// # Errors
///
/// [`AnalysisError::DegenerateVariance`] when both sigma estimates are zero,
/// leaving no computable index.
pub fn compute_capability(
    chart: &ControlChartResult,
    constants: ChartConstants,
    values: &[f64],
    spec: SpecLimits,
) -> Result<CapabilityMetrics, AnalysisError> {
    let x_bar = chart.limits.x_bar_mean;
    let avg_range = chart.limits.range_mean;
    let std_dev_within = avg_range / constants.d2;
    // Short inputs are rejected before this stage, so the sample standard
    // deviation is always defined here.
    let std_dev_overall = stats::sample_std_dev(values).unwrap_or(0.0);

    if std_dev_within == 0.0 && std_dev_overall == 0.0 {
        return Err(AnalysisError::DegenerateVariance {
            std_dev_within,
            std_dev_overall,
        });
    }

    let (cp, cpu, cpl, cpk) = index_family(x_bar, std_dev_within, spec);
    let (pp, ppu, ppl, ppk) = index_family(x_bar, std_dev_overall, spec);

    Ok(CapabilityMetrics {
        x_bar,
        std_dev_within,
        std_dev_overall,
        avg_range,
        cp,
        cpu,
        cpl,
        cpk,
        pp,
        ppu,
        ppl,
        ppk,
        lsl: spec.lsl,
        usl: spec.usl,
        target: spec.target,
    })
}

/// One index family (potential, upper, lower, actual) for a given sigma.
/// All `None` when the sigma is zero.
fn index_family(
    x_bar: f64,
    sigma: f64,
    spec: SpecLimits,
) -> (Option<f64>, Option<f64>, Option<f64>, Option<f64>) {
    if sigma <= 0.0 {
        return (None, None, None, None);
    }
    let potential = Some(spec.tolerance() / (6.0 * sigma));
    let upper = Some((spec.usl - x_bar) / (3.0 * sigma));
    let lower = Some((x_bar - spec.lsl) / (3.0 * sigma));
    let actual = match (upper, lower) {
        (Some(u), Some(l)) => Some(u.min(l)),
        _ => None,
    };
    (potential, upper, lower, actual)
}
