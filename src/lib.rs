//! # spc-engine
//!
//! A pure Statistical Process Control analysis engine for dimensional
//! inspection data. Given an ordered series of readings, a subgroup size,
//! and engineering tolerances, it produces control-chart limits, process
//! capability indices, a distribution summary, special-cause run-rule
//! verdicts, and a textual interpretation.
//!
//! The engine is a synchronous, deterministic, single-pass computation with
//! no I/O and no shared state: every request builds and discards its own
//! value graph, so concurrent callers need no coordination. Fetching and
//! resolving inspection data is the caller's job; [`inspection`] provides
//! the upstream wire shapes and flattens them into an engine request.
//!
//! ## Modules
//!
//! - [`analysis`] — the pipeline entry point ([`analyze`]) and report type
//! - [`spc`] — subgrouping, X̄-R control limits, special-cause run rules
//! - [`capability`] — Cp/Cpk and Pp/Ppk index families
//! - [`distribution`] — histogram binning and summary statistics
//! - [`interpret`] — threshold-based textual verdicts
//! - [`inspection`] — upstream inspection-data shapes and request resolution
//! - [`input`] — readings, specification limits, the analysis request
//! - [`error`] — structured errors and warnings
//!
//! ## Example
//!
//! ```
//! use spc_engine::{analyze, AnalysisRequest, Reading, SpecLimits};
//!
//! let readings: Vec<Reading> = [
//!     9.8, 10.2, 9.9, 10.1, 10.0, 9.7, 10.3, 10.0, 9.9, 10.1,
//! ]
//! .iter()
//! .enumerate()
//! .map(|(i, &v)| Reading::new(v, i as i64))
//! .collect();
//!
//! let spec = SpecLimits::new(9.0, 11.0, 10.0).unwrap();
//! let request = AnalysisRequest::new(readings, 2, spec);
//! let report = analyze(&request).unwrap();
//!
//! assert!(report.metrics.cp.is_some());
//! assert!(!report.ss_analysis.special_cause_present);
//! ```
//!
//! ## References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - Western Electric (1956). *Statistical Quality Control Handbook*.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

pub mod analysis;
pub mod capability;
pub mod distribution;
pub mod error;
pub mod input;
pub mod inspection;
pub mod interpret;
pub mod spc;
mod stats;

pub use analysis::{analyze, analyze_with, Analysis, AnalysisOptions};
pub use capability::CapabilityMetrics;
pub use distribution::{BinMethod, DistributionSummary};
pub use error::{AnalysisError, AnalysisWarning};
pub use input::{AnalysisRequest, Reading, SpecLimits};
pub use interpret::{CapabilityVerdict, InterpretThresholds, ProcessInterpretation};
pub use spc::{ChartLimits, ChartPoint, ControlChartResult, SpecialCauseFlags};
