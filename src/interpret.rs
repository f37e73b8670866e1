//! Textual interpretation of capability metrics and special-cause flags.
//!
//! A pure mapping stage: fixed thresholds classify the index values, the
//! aggregate special-cause flag decides stability, and the two combine into
//! a single decision remark. No numeric computation happens here and the
//! upstream numbers pass through untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capability::CapabilityMetrics;
use crate::spc::SpecialCauseFlags;

/// Capability classification thresholds.
///
/// Configurable, but the defaults are the conventional values: below 1.0 is
/// inadequate, 1.0 up to 1.33 is marginal, 1.33 and above is adequate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretThresholds {
    /// Lower bound of the "marginal" band.
    pub marginal: f64,
    /// Lower bound of the "adequate" band.
    pub adequate: f64,
}

impl Default for InterpretThresholds {
    fn default() -> Self {
        Self {
            marginal: 1.0,
            adequate: 1.33,
        }
    }
}

/// Classification of one capability index value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CapabilityVerdict {
    /// Index below the marginal threshold.
    Inadequate,
    /// Index in the marginal band.
    Marginal,
    /// Index at or above the adequate threshold.
    Adequate,
    /// Index not computable (zero-variance denominator).
    NotComputable,
}

impl CapabilityVerdict {
    /// Classify an index value against the thresholds.
    pub fn classify(index: Option<f64>, thresholds: InterpretThresholds) -> Self {
        match index {
            None => CapabilityVerdict::NotComputable,
            Some(v) if v < thresholds.marginal => CapabilityVerdict::Inadequate,
            Some(v) if v < thresholds.adequate => CapabilityVerdict::Marginal,
            Some(_) => CapabilityVerdict::Adequate,
        }
    }
}

impl fmt::Display for CapabilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CapabilityVerdict::Inadequate => "inadequate",
            CapabilityVerdict::Marginal => "marginal",
            CapabilityVerdict::Adequate => "adequate",
            CapabilityVerdict::NotComputable => "not computable",
        };
        f.write_str(s)
    }
}

/// Human-readable verdicts for the analysis report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInterpretation {
    /// Process potential, from Cp.
    pub process_potential: String,
    /// Short-term process capability, from Cpk.
    pub process_capability: String,
    /// Long-term process performance, from Ppk.
    pub process_performance: String,
    /// Stability verdict from the special-cause aggregate.
    pub process_stability: String,
    /// Overall recommendation combining capability and stability.
    pub decision_remark: String,
}

/// Map metrics and flags to textual verdicts using the given thresholds.
pub fn interpret(
    metrics: &CapabilityMetrics,
    flags: &SpecialCauseFlags,
    thresholds: InterpretThresholds,
) -> ProcessInterpretation {
    let potential = CapabilityVerdict::classify(metrics.cp, thresholds);
    let capability = CapabilityVerdict::classify(metrics.cpk, thresholds);
    let performance = CapabilityVerdict::classify(metrics.ppk, thresholds);

    let stable = !flags.special_cause_present;
    let process_stability = if stable {
        "stable".to_string()
    } else {
        "unstable — special cause detected".to_string()
    };

    let decision_remark = match (capability, stable) {
        (CapabilityVerdict::Adequate, true) => {
            "Process is capable and stable. Continue monitoring.".to_string()
        }
        (CapabilityVerdict::Adequate, false) => {
            "Process capability is adequate but special-cause variation is present. Investigate assignable causes before relying on the indices.".to_string()
        }
        (CapabilityVerdict::Marginal, true) => {
            "Process is stable but only marginally capable. Reduce common-cause variation or re-center the process.".to_string()
        }
        (CapabilityVerdict::Marginal, false) => {
            "Process is marginally capable and shows special-cause variation. Remove assignable causes, then reassess capability.".to_string()
        }
        (CapabilityVerdict::Inadequate, true) => {
            "Process is stable but not capable of meeting the specification. Fundamental process improvement is required.".to_string()
        }
        (CapabilityVerdict::Inadequate, false) => {
            "Process is neither capable nor stable. Remove assignable causes first, then address capability.".to_string()
        }
        (CapabilityVerdict::NotComputable, _) => {
            "Capability indices are not computable for this data set. Verify measurement resolution and variation before interpreting.".to_string()
        }
    };

    ProcessInterpretation {
        process_potential: potential.to_string(),
        process_capability: capability.to_string(),
        process_performance: performance.to_string(),
        process_stability,
        decision_remark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SpecLimits;

    fn metrics_with(cp: Option<f64>, cpk: Option<f64>, ppk: Option<f64>) -> CapabilityMetrics {
        let spec = SpecLimits::new(6.0, 14.0, 10.0).unwrap();
        CapabilityMetrics {
            x_bar: 10.0,
            std_dev_within: 1.0,
            std_dev_overall: 1.0,
            avg_range: 1.0,
            cp,
            cpu: cpk,
            cpl: cpk,
            cpk,
            pp: ppk,
            ppu: ppk,
            ppl: ppk,
            ppk,
            lsl: spec.lsl,
            usl: spec.usl,
            target: spec.target,
        }
    }

    fn quiet_flags() -> SpecialCauseFlags {
        SpecialCauseFlags {
            points_outside_limits: 0,
            range_points_outside_limits: 0,
            eight_consecutive_points: false,
            six_consecutive_trend: false,
            process_shift: false,
            process_spread: false,
            special_cause_present: false,
        }
    }

    #[test]
    fn test_default_thresholds() {
        let t = InterpretThresholds::default();
        assert_eq!(
            CapabilityVerdict::classify(Some(0.99), t),
            CapabilityVerdict::Inadequate
        );
        assert_eq!(
            CapabilityVerdict::classify(Some(1.0), t),
            CapabilityVerdict::Marginal
        );
        assert_eq!(
            CapabilityVerdict::classify(Some(1.32), t),
            CapabilityVerdict::Marginal
        );
        assert_eq!(
            CapabilityVerdict::classify(Some(1.33), t),
            CapabilityVerdict::Adequate
        );
        assert_eq!(
            CapabilityVerdict::classify(None, t),
            CapabilityVerdict::NotComputable
        );
    }

    #[test]
    fn test_stable_adequate_process() {
        let metrics = metrics_with(Some(1.5), Some(1.4), Some(1.4));
        let out = interpret(&metrics, &quiet_flags(), InterpretThresholds::default());
        assert_eq!(out.process_capability, "adequate");
        assert_eq!(out.process_stability, "stable");
        assert!(out.decision_remark.contains("capable and stable"));
    }

    #[test]
    fn test_unstable_process_verdict() {
        let metrics = metrics_with(Some(1.5), Some(1.4), Some(1.4));
        let mut flags = quiet_flags();
        flags.eight_consecutive_points = true;
        flags.special_cause_present = true;
        let out = interpret(&metrics, &flags, InterpretThresholds::default());
        assert!(out.process_stability.starts_with("unstable"));
        assert!(out.decision_remark.contains("special-cause"));
    }

    #[test]
    fn test_not_computable_passthrough() {
        let metrics = metrics_with(None, None, None);
        let out = interpret(&metrics, &quiet_flags(), InterpretThresholds::default());
        assert_eq!(out.process_potential, "not computable");
        assert!(out.decision_remark.contains("not computable"));
    }

    #[test]
    fn test_custom_thresholds() {
        let t = InterpretThresholds {
            marginal: 1.33,
            adequate: 1.67,
        };
        assert_eq!(
            CapabilityVerdict::classify(Some(1.5), t),
            CapabilityVerdict::Marginal
        );
    }
}
