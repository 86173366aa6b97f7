//! Precomputed flow and sensitivity inputs for one screening pass.
//!
//! The power-flow and sensitivity solvers live outside this workspace. What
//! they hand over per run is: base-case and per-contingency complex flow
//! vectors with their pu loadings, the dense base-case PTDF table, and for
//! each contingency group the MLODF matrix restricted to that group's
//! outaged branches (stored CSC so the compensation scan can walk one
//! outage column at a time).

use crate::catalog::ContingencyGroup;
use crate::error::{SrapError, SrapResult};
use num_complex::Complex64;
use sprs::CsMat;

/// Dense base-case sensitivity table: `ptdf[branch][bus]` is the change in
/// flow on the branch per MW injected at the bus.
///
/// Rows are monitored-branch positions, columns bus positions; dense storage
/// because every branch responds to injection at every bus to some degree.
#[derive(Debug, Clone)]
pub struct PtdfTable {
    values: Vec<Vec<f64>>,
    n_buses: usize,
}

impl PtdfTable {
    /// Build from row-major values, checking that rows are rectangular.
    pub fn new(values: Vec<Vec<f64>>) -> SrapResult<Self> {
        let n_buses = values.first().map(|row| row.len()).unwrap_or(0);
        for (m, row) in values.iter().enumerate() {
            if row.len() != n_buses {
                return Err(SrapError::Shape(format!(
                    "PTDF row {} has {} columns, expected {}",
                    m,
                    row.len(),
                    n_buses
                )));
            }
        }
        Ok(Self { values, n_buses })
    }

    /// Base sensitivity row for one branch.
    pub fn row(&self, branch: usize) -> SrapResult<&[f64]> {
        self.values.get(branch).map(|row| row.as_slice()).ok_or_else(|| {
            SrapError::Shape(format!(
                "branch index {} out of range for PTDF with {} rows",
                branch,
                self.values.len()
            ))
        })
    }

    /// Number of branches (rows).
    pub fn n_branches(&self) -> usize {
        self.values.len()
    }

    /// Number of buses (columns).
    pub fn n_buses(&self) -> usize {
        self.n_buses
    }
}

/// Base-case flows and loadings for one time step.
#[derive(Debug, Clone)]
pub struct BaseSnapshot {
    /// Complex branch flows, indexed by monitored-branch position.
    pub flow: Vec<Complex64>,
    /// Flow magnitude normalized by the base rating (pu).
    pub loading: Vec<f64>,
}

impl BaseSnapshot {
    pub fn validate(&self, n_branches: usize) -> SrapResult<()> {
        check_len("base flow", self.flow.len(), n_branches)?;
        check_len("base loading", self.loading.len(), n_branches)
    }
}

/// One contingency group together with its post-contingency flow solution
/// and its restriction of the MLODF matrix.
#[derive(Debug, Clone)]
pub struct ContingencyCase {
    pub group: ContingencyGroup,
    /// Post-contingency complex flows, indexed by monitored-branch position.
    pub flow: Vec<Complex64>,
    /// Post-contingency loading (pu of base rating).
    pub loading: Vec<f64>,
    /// MLODF restricted to this group: `n_branches x group.order()`, CSC.
    /// Column j pairs with `group.branches[j]`.
    pub mlodf: CsMat<f64>,
}

impl ContingencyCase {
    pub fn validate(&self, n_branches: usize) -> SrapResult<()> {
        check_len("contingency flow", self.flow.len(), n_branches)?;
        check_len("contingency loading", self.loading.len(), n_branches)?;
        if !self.mlodf.is_csc() {
            return Err(SrapError::Shape(format!(
                "MLODF for group '{}' must be CSC",
                self.group.name
            )));
        }
        if self.mlodf.rows() != n_branches {
            return Err(SrapError::Shape(format!(
                "MLODF for group '{}' has {} rows, expected {}",
                self.group.name,
                self.mlodf.rows(),
                n_branches
            )));
        }
        if self.mlodf.cols() != self.group.order() {
            return Err(SrapError::Shape(format!(
                "MLODF for group '{}' has {} columns, group outages {}",
                self.group.name,
                self.mlodf.cols(),
                self.group.order()
            )));
        }
        for &k in &self.group.branches {
            if k >= n_branches {
                return Err(SrapError::Validation(format!(
                    "group '{}' outages branch {} but only {} branches exist",
                    self.group.name, k, n_branches
                )));
            }
        }
        Ok(())
    }
}

fn check_len(field: &str, len: usize, expected: usize) -> SrapResult<()> {
    if len != expected {
        return Err(SrapError::Validation(format!(
            "{} has {} entries, expected {} (one per monitored branch)",
            field, len, expected
        )));
    }
    Ok(())
}
