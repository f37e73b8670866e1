//! Control chart factor table.
//!
//! Standard Shewhart chart constants indexed by subgroup size, sourced from
//! ASTM E2587 — Standard Practice for Use of Control Charts in Statistical
//! Process Control.
//!
//! For subgroup size 1 (Individuals / Moving Range chart) the table uses the
//! moving-range convention: the "A2" entry is E2 = 3 / d2(2) ≈ 2.66, applied
//! to the average two-point moving range, and d2 = 1.128 is the n = 2 value
//! since each moving range spans two observations.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use crate::error::AnalysisError;

/// Chart factors for one subgroup size.
///
/// X-bar limits: CL ± `a2` · R-bar. R limits: `d3` · R-bar and `d4` · R-bar.
/// Sigma estimate: R-bar / `d2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConstants {
    /// Subgroup size this row applies to.
    pub n: usize,
    /// X-bar chart limit multiplier (E2 for n = 1).
    pub a2: f64,
    /// R chart lower limit multiplier.
    pub d3: f64,
    /// R chart upper limit multiplier.
    pub d4: f64,
    /// Bias-correction constant for estimating sigma from R-bar.
    pub d2: f64,
}

/// Factor rows for n = 1..=5. Extend by adding rows, not code paths.
const TABLE: [ChartConstants; 5] = [
    // n = 1: individuals chart, two-point moving-range convention.
    ChartConstants { n: 1, a2: 2.66, d3: 0.0, d4: 3.267, d2: 1.128 },
    ChartConstants { n: 2, a2: 1.88, d3: 0.0, d4: 3.267, d2: 1.128 },
    ChartConstants { n: 3, a2: 1.772, d3: 0.0, d4: 2.574, d2: 1.693 },
    ChartConstants { n: 4, a2: 0.796, d3: 0.0, d4: 2.282, d2: 2.059 },
    ChartConstants { n: 5, a2: 0.691, d3: 0.0, d4: 2.114, d2: 2.326 },
];

/// Largest tabulated subgroup size.
pub const MAX_SUBGROUP_SIZE: usize = TABLE.len();

impl ChartConstants {
    /// Look up the factor row for subgroup size `n`.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::UnsupportedSubgroupSize`] when `n` is 0 or beyond the
    /// tabulated range.
    pub fn for_subgroup_size(n: usize) -> Result<Self, AnalysisError> {
        if n == 0 || n > MAX_SUBGROUP_SIZE {
            return Err(AnalysisError::UnsupportedSubgroupSize {
                subgroup_size: n,
                max: MAX_SUBGROUP_SIZE,
            });
        }
        Ok(TABLE[n - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_rows() {
        let c5 = ChartConstants::for_subgroup_size(5).unwrap();
        assert_eq!(c5.a2, 0.691);
        assert_eq!(c5.d4, 2.114);
        assert_eq!(c5.d2, 2.326);

        let c1 = ChartConstants::for_subgroup_size(1).unwrap();
        assert_eq!(c1.a2, 2.66);
        assert_eq!(c1.d2, 1.128);
    }

    #[test]
    fn test_lookup_out_of_range() {
        assert!(ChartConstants::for_subgroup_size(0).is_err());
        assert!(ChartConstants::for_subgroup_size(6).is_err());
    }

    #[test]
    fn test_table_invariants() {
        for row in (1..=MAX_SUBGROUP_SIZE).map(|n| ChartConstants::for_subgroup_size(n).unwrap()) {
            assert!(row.d3 >= 0.0, "D3 must be non-negative for n={}", row.n);
            assert!(row.d4 > 1.0, "D4 must exceed 1 for n={}", row.n);
            assert!(row.a2 > 0.0, "A2 must be positive for n={}", row.n);
            assert!(row.d2 > 0.0, "d2 must be positive for n={}", row.n);
        }
    }

    #[test]
    fn test_factors_decrease_with_subgroup_size() {
        // A2 and D4 shrink as subgroups grow; d2 grows.
        for n in 2..MAX_SUBGROUP_SIZE {
            let a = ChartConstants::for_subgroup_size(n).unwrap();
            let b = ChartConstants::for_subgroup_size(n + 1).unwrap();
            assert!(b.a2 < a.a2, "A2 not decreasing at n={n}");
            assert!(b.d4 <= a.d4, "D4 not decreasing at n={n}");
            assert!(b.d2 >= a.d2, "d2 not increasing at n={n}");
        }
    }
}
