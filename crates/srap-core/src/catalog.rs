//! Input catalogs consumed by the screening engine.
//!
//! Topology bookkeeping lives outside this workspace; what arrives here is
//! the flat, index-aligned view of it: one entry per monitored branch, in
//! the same position across every vector. Constructors validate alignment
//! up front so the per-contingency hot path can index without checks.

use crate::error::{SrapError, SrapResult};
use crate::units::Megawatts;
use log::warn;
use serde::{Deserialize, Serialize};

/// Catalog of monitored branches: names, area membership and the three-level
/// rating hierarchy, all indexed by monitored-branch position.
///
/// The expected (not enforced) ordering per branch is
/// `base_rating <= contingency_rating <= srap_rating`; violations are
/// flagged by [`MonitoredBranches::rating_violations`] rather than silently
/// tolerated, and classify as grade-0 rows downstream when they matter.
#[derive(Debug, Clone, Default)]
pub struct MonitoredBranches {
    /// Branch names, one per monitored branch.
    pub names: Vec<String>,
    /// Area name at the from end.
    pub area_from: Vec<String>,
    /// Area name at the to end.
    pub area_to: Vec<String>,
    /// Normal (base) rating in MW.
    pub base_rating: Vec<f64>,
    /// Post-contingency (emergency) rating in MW.
    pub contingency_rating: Vec<f64>,
    /// Rating under short-term remedial action, in MW.
    pub srap_rating: Vec<f64>,
}

impl MonitoredBranches {
    /// Number of monitored branches.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check that every vector has one entry per monitored branch.
    pub fn validate(&self) -> SrapResult<()> {
        let n = self.names.len();
        let lens = [
            ("area_from", self.area_from.len()),
            ("area_to", self.area_to.len()),
            ("base_rating", self.base_rating.len()),
            ("contingency_rating", self.contingency_rating.len()),
            ("srap_rating", self.srap_rating.len()),
        ];
        for (field, len) in lens {
            if len != n {
                return Err(SrapError::Validation(format!(
                    "{} has {} entries, expected {} (one per monitored branch)",
                    field, len, n
                )));
            }
        }
        Ok(())
    }

    /// Indices of branches whose rating hierarchy is non-monotonic
    /// (`base <= contingency <= srap` violated). Logs a warning per branch.
    pub fn rating_violations(&self) -> Vec<usize> {
        let mut out = Vec::new();
        for m in 0..self.len() {
            let (base, nx, srap) = (
                self.base_rating[m],
                self.contingency_rating[m],
                self.srap_rating[m],
            );
            if base > nx || nx > srap {
                warn!(
                    "branch {} has non-monotonic ratings: base={} contingency={} srap={}",
                    self.names[m], base, nx, srap
                );
                out.push(m);
            }
        }
        out
    }
}

/// A contingency: one or more branches out of service, evaluated together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContingencyGroup {
    /// Human-readable group name; appears verbatim in the report.
    pub name: String,
    /// Positions of the outaged branches in the monitored-branch ordering.
    pub branches: Vec<usize>,
}

impl ContingencyGroup {
    pub fn new(name: impl Into<String>, branches: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            branches,
        }
    }

    /// Order of this contingency (k in N-k).
    pub fn order(&self) -> usize {
        self.branches.len()
    }
}

/// Configuration for SRAP evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrapConfig {
    /// Evaluate SRAP feasibility for eligible overloads. When false the
    /// classifier still runs but no redispatch search happens.
    pub use_srap: bool,
    /// Total emergency redispatch budget per evaluation (MW).
    pub power_budget: Megawatts,
    /// Maximum number of candidate buses the greedy search may draw from.
    pub top_n: usize,
    /// Deadband on the relative flow increase, percent (0-100 scale).
    pub contingency_deadband_pct: f64,
    /// Deadband above the SRAP rating, percent (0-100 scale).
    pub srap_deadband_pct: f64,
}

impl Default for SrapConfig {
    fn default() -> Self {
        Self {
            use_srap: true,
            power_budget: Megawatts(1400.0),
            top_n: 5,
            contingency_deadband_pct: 0.0,
            srap_deadband_pct: 10.0,
        }
    }
}

impl SrapConfig {
    pub fn validate(&self) -> SrapResult<()> {
        if self.top_n == 0 {
            return Err(SrapError::Config("top_n must be at least 1".into()));
        }
        if self.power_budget.0 < 0.0 {
            return Err(SrapError::Config(format!(
                "power budget must be non-negative, got {}",
                self.power_budget.0
            )));
        }
        Ok(())
    }
}
