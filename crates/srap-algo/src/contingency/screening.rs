//! Per-snapshot screening driver.
//!
//! Ties the pieces together for one time step: classify every monitored
//! branch against every contingency group, run the remedial-action search
//! on eligible grades, and collect the outcomes into a report.
//!
//! The grain of parallelism is one task per contingency group. Each task
//! owns a private report and a private usage ledger and reads the shared
//! inputs immutably, so no locking is needed; the driver merges partial
//! reports in group order and sums the ledgers after the join. A caller
//! that aborts a task simply drops it; partially filled task-local
//! reports must never be merged into the global one.

use log::{debug, info};
use rayon::prelude::*;
use srap_core::{
    BaseSnapshot, ContingencyCase, Megawatts, MonitoredBranches, PtdfTable, SrapConfig,
    SrapError, SrapResult,
};

use super::compensation::compensated_sensitivity;
use super::report::{ContingencyRecord, ContingencyReport, BASE_CASE_NAME};
use super::severity::{
    classify, OverloadGrade, OVERLOAD_ACCEPTABLE, OVERLOAD_NOT_ACCEPTABLE, SRAP_NOT_APPLICABLE,
};
use super::srap::{is_solvable, SrapUsageLedger};

/// Screens one snapshot's contingency cases against a fixed catalog of
/// monitored branches and precomputed sensitivities.
///
/// Construction validates every shared input once; afterwards the per-case
/// hot path indexes without checks.
pub struct SnapshotScreener<'a> {
    branches: &'a MonitoredBranches,
    ptdf: &'a PtdfTable,
    /// Redispatchable headroom per bus, MW. Negative entries mean none.
    available_power: &'a [f64],
    config: &'a SrapConfig,
}

impl<'a> SnapshotScreener<'a> {
    pub fn new(
        branches: &'a MonitoredBranches,
        ptdf: &'a PtdfTable,
        available_power: &'a [f64],
        config: &'a SrapConfig,
    ) -> SrapResult<Self> {
        branches.validate()?;
        config.validate()?;
        if ptdf.n_branches() != branches.len() {
            return Err(SrapError::Shape(format!(
                "PTDF has {} branch rows, catalog has {} branches",
                ptdf.n_branches(),
                branches.len()
            )));
        }
        if available_power.len() != ptdf.n_buses() {
            return Err(SrapError::Validation(format!(
                "available power has {} entries, PTDF has {} buses",
                available_power.len(),
                ptdf.n_buses()
            )));
        }
        // Flag data-quality problems early; classification still proceeds
        // and grades the affected branches on their merits.
        let violations = branches.rating_violations();
        if !violations.is_empty() {
            info!(
                "{} of {} monitored branches have a non-monotonic rating hierarchy",
                violations.len(),
                branches.len()
            );
        }
        Ok(Self {
            branches,
            ptdf,
            available_power,
            config,
        })
    }

    /// Analyze one contingency case, appending outcomes to `report` and
    /// recording redispatch draws in `ledger`.
    ///
    /// Base-case overload rows are emitted here too, guarded by
    /// `contingency_idx == 0` so each time step reports them exactly once
    /// no matter how many groups it screens.
    pub fn analyze(
        &self,
        report: &mut ContingencyReport,
        ledger: &mut SrapUsageLedger,
        time_index: usize,
        contingency_idx: usize,
        base: &BaseSnapshot,
        case: &ContingencyCase,
    ) -> SrapResult<()> {
        if contingency_idx == 0 {
            self.base_case_rows(report, time_index, base);
        }

        for m in 0..self.branches.len() {
            let c_flow = case.flow[m].norm();
            let c_loading = case.loading[m].abs();

            let Some(severity) = classify(
                base.flow[m].norm(),
                self.branches.base_rating[m],
                c_flow,
                case.loading[m],
                self.branches.contingency_rating[m],
                self.branches.srap_rating[m],
                self.config.contingency_deadband_pct,
                self.config.srap_deadband_pct,
            ) else {
                continue;
            };

            let mut overload_status = severity.overload_status;
            let mut post_srap_flow = c_flow;
            let mut post_srap_loading = c_loading;
            let mut srap_power = 0.0;
            let mut solved_by_srap = false;

            if self.config.use_srap && severity.grade.srap_eligible() {
                let sensitivity = compensated_sensitivity(
                    m,
                    &case.group.branches,
                    case.mlodf.view(),
                    self.ptdf,
                )?;
                // The real part keeps the sign the redispatch direction
                // needs; the correction target is the emergency rating.
                let (solved, power) = is_solvable(
                    m,
                    case.flow[m].re,
                    self.branches.contingency_rating[m],
                    self.config.power_budget.0,
                    self.available_power,
                    &sensitivity,
                    self.config.top_n,
                    ledger,
                );
                solved_by_srap = solved;
                srap_power = power;
                if power > 0.0 {
                    post_srap_flow = c_flow - power;
                    post_srap_loading = Megawatts(post_srap_flow)
                        .per_unit_of(Megawatts(self.branches.base_rating[m]))
                        .0;
                }
                // Only the provisional grade-2 verdict is rewritten; the
                // grade-3 deadband row keeps its message either way.
                if solved && severity.grade == OverloadGrade::SrapEligible {
                    overload_status = OVERLOAD_ACCEPTABLE;
                }
            }

            report.push(ContingencyRecord {
                time_index,
                area_from: self.branches.area_from[m].clone(),
                area_to: self.branches.area_to[m].clone(),
                monitored: self.branches.names[m].clone(),
                contingency: case.group.name.clone(),
                base_rating: self.branches.base_rating[m],
                contingency_rating: self.branches.contingency_rating[m],
                srap_rating: self.branches.srap_rating[m],
                base_flow: base.flow[m].norm(),
                post_contingency_flow: c_flow,
                post_srap_flow,
                base_loading: base.loading[m].abs(),
                post_contingency_loading: c_loading,
                post_srap_loading,
                overload_status: overload_status.to_string(),
                srap_status: severity.srap_status.to_string(),
                srap_power,
                solved_by_srap,
            });
        }

        Ok(())
    }

    /// Screen every case of one snapshot in parallel.
    ///
    /// Each rayon task owns a private report and ledger; results are merged
    /// in group order, so the output is identical to a sequential pass.
    pub fn screen_all(
        &self,
        time_index: usize,
        base: &BaseSnapshot,
        cases: &[ContingencyCase],
    ) -> SrapResult<(ContingencyReport, SrapUsageLedger)> {
        base.validate(self.branches.len())?;
        for case in cases {
            case.validate(self.branches.len())?;
        }

        let partials: SrapResult<Vec<(ContingencyReport, SrapUsageLedger)>> = cases
            .par_iter()
            .enumerate()
            .map(|(contingency_idx, case)| {
                let mut report = ContingencyReport::new();
                let mut ledger = SrapUsageLedger::new();
                self.analyze(
                    &mut report,
                    &mut ledger,
                    time_index,
                    contingency_idx,
                    base,
                    case,
                )?;
                Ok((report, ledger))
            })
            .collect();

        let mut report = ContingencyReport::new();
        let mut ledger = SrapUsageLedger::new();
        for (partial_report, partial_ledger) in partials? {
            report.merge(partial_report);
            ledger.merge(partial_ledger);
        }

        debug!(
            "t={}: screened {} contingency groups, {} report rows",
            time_index,
            cases.len(),
            report.len()
        );
        Ok((report, ledger))
    }

    /// Rows for branches already over their base rating with no
    /// contingency applied. Post-contingency and post-SRAP fields carry
    /// sentinel zeros; the contingency name is the literal `"Base"`.
    fn base_case_rows(&self, report: &mut ContingencyReport, time_index: usize, base: &BaseSnapshot) {
        for m in 0..self.branches.len() {
            if base.loading[m].abs() <= 1.0 {
                continue;
            }
            report.push(ContingencyRecord {
                time_index,
                area_from: self.branches.area_from[m].clone(),
                area_to: self.branches.area_to[m].clone(),
                monitored: self.branches.names[m].clone(),
                contingency: BASE_CASE_NAME.to_string(),
                base_rating: self.branches.base_rating[m],
                contingency_rating: self.branches.contingency_rating[m],
                srap_rating: self.branches.srap_rating[m],
                base_flow: base.flow[m].norm(),
                post_contingency_flow: 0.0,
                post_srap_flow: 0.0,
                base_loading: base.loading[m].abs(),
                post_contingency_loading: 0.0,
                post_srap_loading: 0.0,
                overload_status: OVERLOAD_NOT_ACCEPTABLE.to_string(),
                srap_status: SRAP_NOT_APPLICABLE.to_string(),
                srap_power: 0.0,
                solved_by_srap: false,
            });
        }
    }
}
