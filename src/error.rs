//! Error and warning types for SPC analysis.
//!
//! Hard failures abort the analysis before any partial result is produced;
//! soft conditions are returned as [`AnalysisWarning`] values alongside a
//! valid result. The engine itself never logs — every diagnostic is
//! structured data for the caller to present.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard failure during an analysis request.
///
/// Each variant carries the context a caller needs to present the failure:
/// the offending index, the computed value, or the limits that conflicted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Specification limits are inconsistent: LSL must be strictly below the
    /// target, and the target strictly below USL. Detected before any
    /// reading is examined.
    #[error("invalid specification limits: LSL={lsl}, target={target}, USL={usl} (require LSL < target < USL, all finite)")]
    InvalidSpecLimits { lsl: f64, usl: f64, target: f64 },

    /// Fewer than two complete subgroups — control limits need at least two
    /// plotted points to be meaningful.
    #[error("insufficient data: {subgroups} complete subgroup(s) of size {subgroup_size} from {readings} reading(s); at least 2 are required")]
    InsufficientData {
        readings: usize,
        subgroup_size: usize,
        subgroups: usize,
    },

    /// Both the within-subgroup and overall standard deviation are zero, so
    /// no capability index is computable.
    #[error("degenerate variance: stdDevWithin={std_dev_within}, stdDevOverall={std_dev_overall}; no capability index is computable")]
    DegenerateVariance {
        std_dev_within: f64,
        std_dev_overall: f64,
    },

    /// A reading value is NaN or infinite.
    #[error("malformed reading at index {index}: value {value} is not finite")]
    MalformedReading { index: usize, value: f64 },

    /// Subgroup size outside the supported chart-constant table.
    #[error("unsupported subgroup size {subgroup_size}: chart constants are tabulated for n = 1..={max}")]
    UnsupportedSubgroupSize { subgroup_size: usize, max: usize },
}

/// Soft condition carried alongside a successful analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisWarning {
    /// Fewer subgroups than the conventional reliability threshold (~20);
    /// limits are computed but should be treated as provisional.
    LowSubgroupCount { subgroups: usize, recommended: usize },

    /// R-bar is zero: all range limits collapse to 0 and the X-bar limits
    /// collapse to the grand mean.
    ZeroRangeVariation,
}
