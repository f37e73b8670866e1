//! Statistical Process Control: subgrouping, control limits, and run rules.
//!
//! - [`constants`] — Shewhart chart factor table (A2, D3, D4, d2) for n = 1..=5
//! - [`subgroup`] — fixed-window subgrouping with moving ranges for n = 1
//! - [`control`] — X-bar / R chart points and control limits
//! - [`rules`] — special-cause run rules over the ordered point sequences
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts
//! - Western Electric (1956). *Statistical Quality Control Handbook*.

pub mod constants;
pub mod control;
pub mod rules;
pub mod subgroup;

pub use constants::{ChartConstants, MAX_SUBGROUP_SIZE};
pub use control::{compute_control_limits, ChartLimits, ChartPoint, ControlChartResult};
pub use rules::{detect_special_causes, SpecialCauseFlags};
pub use subgroup::{build_subgroups, reliability_warning, Subgroup, RELIABLE_SUBGROUP_COUNT};
