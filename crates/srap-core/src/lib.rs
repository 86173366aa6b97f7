//! # srap-core: Data Model for SRAP Contingency Screening
//!
//! Provides the input catalogs, precomputed-factor containers, unit
//! newtypes and the unified error type shared by the screening workspace.
//!
//! The screening engine is a fast approximate decision procedure run once
//! per (time step, contingency, monitored branch) over potentially millions
//! of combinations. It never re-solves the network: base and
//! post-contingency flows, PTDF sensitivities, and per-contingency MLODF
//! restrictions all arrive precomputed through the types in this
//! crate, validated once, then read immutably by the hot path.

pub mod catalog;
pub mod error;
pub mod factors;
pub mod units;

pub use catalog::{ContingencyGroup, MonitoredBranches, SrapConfig};
pub use error::{SrapError, SrapResult};
pub use factors::{BaseSnapshot, ContingencyCase, PtdfTable};
pub use units::{Megawatts, PerUnit, RATING_EPS};
