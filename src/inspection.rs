//! Upstream inspection-data shapes and resolution into an engine request.
//!
//! The surrounding system fetches reference data (shifts, materials,
//! operations, gauges) and raw inspection rows from an external service.
//! These arrive as JSON with `PascalCase` field names and string-typed
//! numeric specifications; this module mirrors those wire shapes and flattens
//! inspection rows into the [`AnalysisRequest`] the engine consumes. It
//! performs no network access, authentication, or date filtering itself.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::input::{AnalysisRequest, Reading, SpecLimits};

/// A production shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftData {
    #[serde(rename = "ShiftId")]
    pub shift_id: String,
    #[serde(rename = "ShiftName")]
    pub shift_name: String,
}

/// A material (part) under inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialData {
    #[serde(rename = "MaterialCode")]
    pub material_code: String,
    #[serde(rename = "MaterialName")]
    pub material_name: String,
}

/// A manufacturing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationData {
    #[serde(rename = "OperationCode")]
    pub operation_code: String,
    #[serde(rename = "OperationName")]
    pub operation_name: String,
}

/// A measurement gauge. The upstream service spells the wire fields "Guage".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeData {
    #[serde(rename = "GuageCode")]
    pub gauge_code: String,
    #[serde(rename = "GuageName")]
    pub gauge_name: String,
}

/// One raw inspection row. Numeric fields arrive as strings on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionRecord {
    /// Shift the reading was taken in.
    #[serde(rename = "ShiftCode")]
    pub shift_code: String,
    /// The actual measured value.
    #[serde(rename = "ActualSpecification")]
    pub actual_specification: String,
    /// Lower specification limit applicable to this reading.
    #[serde(rename = "FromSpecification")]
    pub from_specification: String,
    /// Upper specification limit applicable to this reading.
    #[serde(rename = "ToSpecification")]
    pub to_specification: String,
}

/// Flatten ordered inspection rows into an [`AnalysisRequest`].
///
/// Record order is preserved as the chronological reading order. The
/// tolerance is taken from the first record; the upstream feed carries no
/// explicit target, so the tolerance midpoint is used.
///
/// # Errors
///
/// - [`AnalysisError::MalformedReading`] when a row's measured value does not
///   parse to a finite number (the index names the offending row)
/// - [`AnalysisError::InvalidSpecLimits`] when the first row's from/to
///   specifications do not parse or are not strictly ordered
/// - [`AnalysisError::InsufficientData`] when no rows were supplied
pub fn resolve_request(
    records: &[InspectionRecord],
    subgroup_size: usize,
) -> Result<AnalysisRequest, AnalysisError> {
    let first = records.first().ok_or(AnalysisError::InsufficientData {
        readings: 0,
        subgroup_size,
        subgroups: 0,
    })?;

    let lsl = parse_spec_field(&first.from_specification);
    let usl = parse_spec_field(&first.to_specification);
    let target = (lsl + usl) / 2.0;
    let spec_limits = SpecLimits::new(lsl, usl, target)?;

    let mut readings = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let value: f64 = record
            .actual_specification
            .trim()
            .parse()
            .unwrap_or(f64::NAN);
        if !value.is_finite() {
            return Err(AnalysisError::MalformedReading { index, value });
        }
        readings.push(Reading {
            value,
            timestamp: index as i64,
            shift: Some(record.shift_code.clone()),
        });
    }

    Ok(AnalysisRequest::new(readings, subgroup_size, spec_limits))
}

/// Parse a specification bound; unparseable input becomes NaN, which the
/// [`SpecLimits`] constructor rejects with full context.
fn parse_spec_field(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(shift: &str, actual: &str, from: &str, to: &str) -> InspectionRecord {
        InspectionRecord {
            shift_code: shift.to_string(),
            actual_specification: actual.to_string(),
            from_specification: from.to_string(),
            to_specification: to.to_string(),
        }
    }

    #[test]
    fn test_resolve_preserves_order_and_shift() {
        let records = vec![
            record("A", "10.1", "6.0", "14.0"),
            record("A", "9.9", "6.0", "14.0"),
            record("B", "10.3", "6.0", "14.0"),
        ];
        let request = resolve_request(&records, 1).unwrap();
        assert_eq!(request.readings.len(), 3);
        assert_eq!(request.readings[0].value, 10.1);
        assert_eq!(request.readings[2].shift.as_deref(), Some("B"));
        assert_eq!(request.spec_limits.lsl, 6.0);
        assert_eq!(request.spec_limits.usl, 14.0);
        assert_eq!(request.spec_limits.target, 10.0);
    }

    #[test]
    fn test_unparseable_value_names_row() {
        let records = vec![
            record("A", "10.1", "6.0", "14.0"),
            record("A", "n/a", "6.0", "14.0"),
        ];
        match resolve_request(&records, 1).unwrap_err() {
            AnalysisError::MalformedReading { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_inverted_specification_rejected() {
        let records = vec![record("A", "10.0", "14.0", "6.0")];
        assert!(matches!(
            resolve_request(&records, 1).unwrap_err(),
            AnalysisError::InvalidSpecLimits { .. }
        ));
    }

    #[test]
    fn test_empty_feed_is_insufficient() {
        assert!(matches!(
            resolve_request(&[], 2).unwrap_err(),
            AnalysisError::InsufficientData { readings: 0, .. }
        ));
    }

    #[test]
    fn test_wire_shape_deserializes() {
        let json = r#"{
            "ShiftCode": "1",
            "ActualSpecification": "10.25",
            "FromSpecification": "9.5",
            "ToSpecification": "10.5"
        }"#;
        let rec: InspectionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.actual_specification, "10.25");

        let gauge: GaugeData =
            serde_json::from_str(r#"{"GuageCode": "G1", "GuageName": "Bore gauge"}"#).unwrap();
        assert_eq!(gauge.gauge_code, "G1");
    }
}
