//! Subgrouping of ordered readings.
//!
//! Readings are consumed in chronological order and sliced into consecutive,
//! non-overlapping windows of the chosen subgroup size. A trailing partial
//! window is dropped rather than padded, to avoid biasing range statistics.
//!
//! For subgroup size 1 each subgroup is a single reading and its "range" is
//! the absolute moving range against the previous reading; the first subgroup
//! carries no moving range and is excluded from R-bar.

use crate::error::{AnalysisError, AnalysisWarning};

/// Conventional number of subgroups below which control limits are
/// considered provisional.
pub const RELIABLE_SUBGROUP_COUNT: usize = 20;

/// One subgroup: a window of consecutive readings reduced to its statistics.
///
/// Created once by [`build_subgroups`], never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Subgroup {
    /// Zero-based position in the subgroup sequence.
    pub index: usize,
    /// Subgroup mean (the reading itself for size 1).
    pub mean: f64,
    /// Subgroup range (max − min), or the moving range for size 1.
    /// `None` only for the first subgroup of an individuals chart.
    pub range: Option<f64>,
}

/// Slice ordered reading values into complete subgroups of size `n`.
///
/// # Errors
///
/// [`AnalysisError::InsufficientData`] when fewer than 2 complete subgroups
/// can be formed.
pub fn build_subgroups(values: &[f64], n: usize) -> Result<Vec<Subgroup>, AnalysisError> {
    debug_assert!(n >= 1);
    let complete = values.len() / n;
    if complete < 2 {
        return Err(AnalysisError::InsufficientData {
            readings: values.len(),
            subgroup_size: n,
            subgroups: complete,
        });
    }

    let subgroups = if n == 1 {
        values
            .iter()
            .enumerate()
            .map(|(index, &value)| Subgroup {
                index,
                mean: value,
                // Moving range vs the previous reading; undefined for the first.
                range: (index > 0).then(|| (value - values[index - 1]).abs()),
            })
            .collect()
    } else {
        values
            .chunks_exact(n)
            .enumerate()
            .map(|(index, window)| {
                let mean = window.iter().sum::<f64>() / n as f64;
                let max = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let min = window.iter().cloned().fold(f64::INFINITY, f64::min);
                Subgroup {
                    index,
                    mean,
                    range: Some(max - min),
                }
            })
            .collect()
    };

    Ok(subgroups)
}

/// Reliability warning when the subgroup count is below the conventional
/// threshold. Analysis still proceeds.
pub fn reliability_warning(subgroups: &[Subgroup]) -> Option<AnalysisWarning> {
    (subgroups.len() < RELIABLE_SUBGROUP_COUNT).then_some(AnalysisWarning::LowSubgroupCount {
        subgroups: subgroups.len(),
        recommended: RELIABLE_SUBGROUP_COUNT,
    })
}
