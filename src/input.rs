//! Engine input types: readings, specification limits, and the analysis
//! request.
//!
//! The engine operates on a fully materialized input — an ordered reading
//! list plus externally supplied tolerances. Validation happens up front:
//! specification limits first, then reading finiteness, so an inverted
//! tolerance fails before any reading is touched.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// A single dimensional inspection reading, ordered by inspection time.
///
/// Immutable once ingested. The engine relies only on the given order;
/// timestamps are carried through for the caller, never used in arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// The measured value.
    pub value: f64,
    /// Inspection time as epoch milliseconds.
    pub timestamp: i64,
    /// Originating shift code, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
}

impl Reading {
    /// Create a reading with no shift context.
    pub fn new(value: f64, timestamp: i64) -> Self {
        Self {
            value,
            timestamp,
            shift: None,
        }
    }
}

/// Engineering tolerance: lower/upper specification limits and a target.
///
/// # Invariants
///
/// - All three values are finite
/// - `lsl < target < usl`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecLimits {
    /// Lower specification limit.
    pub lsl: f64,
    /// Upper specification limit.
    pub usl: f64,
    /// Target (nominal) value.
    pub target: f64,
}

impl SpecLimits {
    /// Create validated specification limits.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidSpecLimits`] if any value is non-finite, if
    /// `lsl >= usl`, or if the target falls outside `(lsl, usl)`.
    pub fn new(lsl: f64, usl: f64, target: f64) -> Result<Self, AnalysisError> {
        let valid = lsl.is_finite()
            && usl.is_finite()
            && target.is_finite()
            && lsl < target
            && target < usl;
        if !valid {
            return Err(AnalysisError::InvalidSpecLimits { lsl, usl, target });
        }
        Ok(Self { lsl, usl, target })
    }

    /// Tolerance width, `usl - lsl`.
    pub fn tolerance(&self) -> f64 {
        self.usl - self.lsl
    }
}

/// A complete analysis request: ordered readings, subgroup size, tolerances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// Readings in chronological order.
    pub readings: Vec<Reading>,
    /// Subgroup (sample) size, 1..=5.
    pub subgroup_size: usize,
    /// Specification limits and target.
    pub spec_limits: SpecLimits,
}

impl AnalysisRequest {
    /// Create a request from pre-validated spec limits.
    pub fn new(readings: Vec<Reading>, subgroup_size: usize, spec_limits: SpecLimits) -> Self {
        Self {
            readings,
            subgroup_size,
            spec_limits,
        }
    }

    /// Check every reading value is finite.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::MalformedReading`] naming the first offending index.
    pub fn validate_readings(&self) -> Result<(), AnalysisError> {
        for (index, reading) in self.readings.iter().enumerate() {
            if !reading.value.is_finite() {
                return Err(AnalysisError::MalformedReading {
                    index,
                    value: reading.value,
                });
            }
        }
        Ok(())
    }

    /// Raw reading values in order.
    pub fn values(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_limits_valid() {
        let spec = SpecLimits::new(6.0, 14.0, 10.0).unwrap();
        assert_eq!(spec.tolerance(), 8.0);
    }

    #[test]
    fn test_spec_limits_inverted_rejected() {
        let err = SpecLimits::new(10.0, 5.0, 7.5).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSpecLimits { .. }));
    }

    #[test]
    fn test_spec_limits_target_outside_rejected() {
        assert!(SpecLimits::new(0.0, 10.0, 12.0).is_err());
        assert!(SpecLimits::new(0.0, 10.0, -1.0).is_err());
        // Target on a limit is also rejected: strict ordering required.
        assert!(SpecLimits::new(0.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn test_spec_limits_non_finite_rejected() {
        assert!(SpecLimits::new(f64::NAN, 10.0, 5.0).is_err());
        assert!(SpecLimits::new(0.0, f64::INFINITY, 5.0).is_err());
    }

    #[test]
    fn test_validate_readings_names_index() {
        let spec = SpecLimits::new(0.0, 10.0, 5.0).unwrap();
        let readings = vec![
            Reading::new(1.0, 0),
            Reading::new(f64::NAN, 1),
            Reading::new(3.0, 2),
        ];
        let request = AnalysisRequest::new(readings, 1, spec);
        match request.validate_readings().unwrap_err() {
            AnalysisError::MalformedReading { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
