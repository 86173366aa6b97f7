//! Compensated post-contingency sensitivities.
//!
//! The base-case PTDF row of a monitored branch describes how its flow
//! responds to bus injections with the full network intact. After a
//! contingency removes branches, the response changes; refactorizing the
//! network per contingency is far too slow for screening. Instead the
//! post-contingency row is assembled from factors computed once:
//!
//! ```text
//! row(m) = PTDF[m,:] + Σ_k MLODF[m,k] · PTDF[k,:]    (k over outaged branches)
//! ```
//!
//! This is the hottest loop in the engine: it runs once per eligible
//! (branch, contingency) pair. The MLODF restriction arrives CSC so the
//! scan touches only the nonzeros of each outage column, and the only
//! allocation is the output row itself; no sparse product is ever
//! materialized.

use sprs::CsMatView;
use srap_core::{PtdfTable, SrapError, SrapResult};

/// Assemble the post-contingency sensitivity row of `monitored` to bus
/// injections, given the outaged branches of the contingency and the MLODF
/// matrix restricted to them (column j pairs with `outages[j]`).
///
/// With an empty outage list the result is exactly the base PTDF row.
pub fn compensated_sensitivity(
    monitored: usize,
    outages: &[usize],
    mlodf: CsMatView<'_, f64>,
    ptdf: &PtdfTable,
) -> SrapResult<Vec<f64>> {
    if !mlodf.is_csc() {
        return Err(SrapError::Shape("MLODF restriction must be CSC".into()));
    }
    if mlodf.cols() != outages.len() {
        return Err(SrapError::Shape(format!(
            "MLODF has {} columns, outage list has {}",
            mlodf.cols(),
            outages.len()
        )));
    }
    if mlodf.rows() != ptdf.n_branches() {
        return Err(SrapError::Shape(format!(
            "MLODF has {} rows, PTDF has {} branches",
            mlodf.rows(),
            ptdf.n_branches()
        )));
    }

    let mut row = ptdf.row(monitored)?.to_vec();

    for (position, &outaged) in outages.iter().enumerate() {
        // Scan only the nonzeros of this outage column; all entries other
        // than the monitored branch's row are someone else's compensation.
        if let Some(column) = mlodf.outer_view(position) {
            for (branch, &factor) in column.iter() {
                if branch == monitored {
                    let base = ptdf.row(outaged)?;
                    for (acc, &s) in row.iter_mut().zip(base.iter()) {
                        *acc += factor * s;
                    }
                }
            }
        }
    }

    Ok(row)
}
