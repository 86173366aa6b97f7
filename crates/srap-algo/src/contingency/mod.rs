//! Post-contingency overload classification and SRAP feasibility.
//!
//! ## Key concepts
//!
//! - **PTDF (Power Transfer Distribution Factor):** sensitivity of a branch
//!   flow to a bus injection, computed once for the base topology.
//!
//! - **MLODF (line-outage distribution factor):** sensitivity of a branch's
//!   flow to the outage of another branch. Compensating PTDF rows with
//!   MLODF terms gives post-contingency sensitivities without ever
//!   refactorizing the network.
//!
//! - **SRAP (short-term remedial action):** a bounded emergency redispatch
//!   of nearby generation that may pull a post-contingency overload back
//!   within the emergency rating.
//!
//! ## Pipeline
//!
//! For each (time step, contingency group, monitored branch):
//!
//! 1. [`severity::classify`] turns the post-contingency flow into a
//!    discrete grade plus status messages, or decides the branch is not
//!    reported at all.
//! 2. For SRAP-eligible grades, [`compensation::compensated_sensitivity`]
//!    assembles the post-contingency sensitivity row from precomputed
//!    factors. This is the hot loop of the whole engine.
//! 3. [`srap::is_solvable`] greedily allocates bounded redispatch across
//!    the highest-sensitivity buses and reports feasibility.
//! 4. The outcome lands as one row in the append-only
//!    [`report::ContingencyReport`].
//!
//! [`screening::SnapshotScreener`] drives the pipeline, one rayon task per
//! contingency group.

pub mod compensation;
pub mod report;
pub mod screening;
pub mod severity;
pub mod srap;

pub use compensation::compensated_sensitivity;
pub use report::{ContingencyRecord, ContingencyReport, BASE_CASE_NAME, REPORT_HEADERS};
pub use screening::SnapshotScreener;
pub use severity::{classify, OverloadGrade, Severity};
pub use srap::{is_solvable, SrapUsageLedger, SENSITIVITY_THRESHOLD};
