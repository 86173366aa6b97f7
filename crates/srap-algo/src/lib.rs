//! # srap-algo: Contingency Overload Screening with SRAP Feasibility
//!
//! Screens transmission networks for thermal overloads that appear after
//! the loss of one or more branches, and decides per overloaded branch
//! whether a bounded emergency redispatch (SRAP) can bring it back within
//! its emergency rating.
//!
//! This is a screening engine, not a dispatch engine: it runs once per
//! (time step × contingency × monitored branch) over potentially millions
//! of combinations, so everything is built around precomputed sensitivity
//! factors and a greedy largest-sensitivity-first feasibility bound. The
//! network is never re-solved here.
//!
//! ## Example
//!
//! ```ignore
//! use srap_algo::SnapshotScreener;
//! use srap_core::SrapConfig;
//!
//! let config = SrapConfig::default();
//! let screener = SnapshotScreener::new(&branches, &ptdf, &available_power, &config)?;
//! let (report, ledger) = screener.screen_all(hour, &base, &cases)?;
//! for row in report.to_table() {
//!     println!("{}", row.join(", "));
//! }
//! ```

pub mod contingency;

pub use contingency::{
    classify, compensated_sensitivity, is_solvable, ContingencyRecord, ContingencyReport,
    OverloadGrade, Severity, SnapshotScreener, SrapUsageLedger, BASE_CASE_NAME, REPORT_HEADERS,
    SENSITIVITY_THRESHOLD,
};
