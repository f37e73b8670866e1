//! The analysis pipeline: one request in, one report out.
//!
//! A single-pass, stateless computation. Stages consume the previous stage's
//! output and data flows strictly forward: subgroups feed the control limits,
//! control limits feed capability and the rule scan, the flat reading list
//! feeds the distribution, and capability plus rule flags feed the
//! interpretation. Nothing is shared between requests, so concurrent callers
//! need no synchronization.
//!
//! Validation order: specification limits, then reading finiteness, then
//! subgrouping — an inverted tolerance fails before any reading is examined.

use serde::{Deserialize, Serialize};

use crate::capability::{compute_capability, CapabilityMetrics};
use crate::distribution::{build_distribution, BinMethod, DistributionSummary};
use crate::error::{AnalysisError, AnalysisWarning};
use crate::input::{AnalysisRequest, SpecLimits};
use crate::interpret::{interpret, InterpretThresholds, ProcessInterpretation};
use crate::spc::{
    build_subgroups, compute_control_limits, detect_special_causes, reliability_warning,
    ChartConstants, ControlChartResult, SpecialCauseFlags,
};

/// Tunable policy knobs for an analysis. The defaults match convention.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// Histogram bin-count rule.
    pub bin_method: BinMethod,
    /// Capability classification thresholds.
    pub thresholds: InterpretThresholds,
}

/// The complete SPC report for one request.
///
/// Serializes to the camelCase JSON shape consumed by the dashboard;
/// point sequences keep their chart order and floats keep full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Capability and performance metrics.
    pub metrics: CapabilityMetrics,
    /// X-bar / R chart points and limits.
    pub control_charts: ControlChartResult,
    /// Histogram and summary statistics over the raw readings.
    pub distribution: DistributionSummary,
    /// Special-cause rule verdicts.
    pub ss_analysis: SpecialCauseFlags,
    /// Textual verdicts.
    pub process_interpretation: ProcessInterpretation,
    /// Soft conditions encountered while computing.
    pub warnings: Vec<AnalysisWarning>,
}

/// Run the full analysis with default options.
pub fn analyze(request: &AnalysisRequest) -> Result<Analysis, AnalysisError> {
    analyze_with(request, AnalysisOptions::default())
}

/// Run the full analysis with explicit options.
///
/// # Errors
///
/// Any [`AnalysisError`]; see the per-stage documentation. No partial
/// output is produced on failure.
pub fn analyze_with(
    request: &AnalysisRequest,
    options: AnalysisOptions,
) -> Result<Analysis, AnalysisError> {
    // Re-validate the limits: the request struct has public fields, so they
    // may not have gone through SpecLimits::new.
    let spec = SpecLimits::new(
        request.spec_limits.lsl,
        request.spec_limits.usl,
        request.spec_limits.target,
    )?;
    request.validate_readings()?;

    let constants = ChartConstants::for_subgroup_size(request.subgroup_size)?;
    let values = request.values();

    let subgroups = build_subgroups(&values, request.subgroup_size)?;

    let mut warnings = Vec::new();
    if let Some(warning) = reliability_warning(&subgroups) {
        warnings.push(warning);
    }

    let (control_charts, range_warning) = compute_control_limits(&subgroups, constants);
    if let Some(warning) = range_warning {
        warnings.push(warning);
    }

    let metrics = compute_capability(&control_charts, constants, &values, spec)?;
    let distribution = build_distribution(&values, spec, options.bin_method);
    let ss_analysis = detect_special_causes(&control_charts);
    let process_interpretation = interpret(&metrics, &ss_analysis, options.thresholds);

    Ok(Analysis {
        metrics,
        control_charts,
        distribution,
        ss_analysis,
        process_interpretation,
        warnings,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::input::Reading;
    use proptest::prelude::*;

    fn request_from(values: &[f64], n: usize, lsl: f64, usl: f64) -> AnalysisRequest {
        let readings = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Reading::new(v, i as i64))
            .collect();
        AnalysisRequest {
            readings,
            subgroup_size: n,
            spec_limits: SpecLimits {
                lsl,
                usl,
                target: (lsl + usl) / 2.0,
            },
        }
    }

    proptest! {
        #[test]
        fn range_limits_ordered_and_non_negative(
            values in proptest::collection::vec(-1e3_f64..1e3, 10..=80),
            n in 1_usize..=5,
        ) {
            let req = request_from(&values, n, -2e3, 2e3);
            if let Ok(analysis) = analyze(&req) {
                let l = analysis.control_charts.limits;
                prop_assert!(l.range_lcl <= l.range_mean, "LCL {} > mean {}", l.range_lcl, l.range_mean);
                prop_assert!(l.range_mean <= l.range_ucl, "mean {} > UCL {}", l.range_mean, l.range_ucl);
                prop_assert!(l.range_lcl >= 0.0, "range LCL negative: {}", l.range_lcl);
            }
        }

        #[test]
        fn widening_tolerance_never_decreases_cp(
            values in proptest::collection::vec(1.0_f64..9.0, 10..=60),
            widen in 0.1_f64..50.0,
            n in 1_usize..=5,
        ) {
            let narrow = request_from(&values, n, 0.0, 10.0);
            let wide = request_from(&values, n, -widen, 10.0 + widen);
            if let (Ok(a), Ok(b)) = (analyze(&narrow), analyze(&wide)) {
                if let (Some(cp_narrow), Some(cp_wide)) = (a.metrics.cp, b.metrics.cp) {
                    prop_assert!(cp_wide >= cp_narrow - 1e-12);
                }
                if let (Some(pp_narrow), Some(pp_wide)) = (a.metrics.pp, b.metrics.pp) {
                    prop_assert!(pp_wide >= pp_narrow - 1e-12);
                }
            }
        }

        #[test]
        fn analysis_never_panics(
            values in proptest::collection::vec(-1e6_f64..1e6, 0..=40),
            n in 1_usize..=5,
        ) {
            let req = request_from(&values, n, -1e7, 1e7);
            let _ = analyze(&req);
        }
    }
}
