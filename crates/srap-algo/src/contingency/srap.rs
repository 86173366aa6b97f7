//! Greedy bus-selection search for short-term remedial action.
//!
//! Given the compensated sensitivity row of an overloaded branch, the
//! search decides whether a bounded redispatch of nearby generation can pull
//! the branch back within its target rating, and how much power each
//! candidate bus must contribute. Largest-sensitivity-first and greedy: a
//! fast, explainable feasibility bound for screening, not dispatch-grade
//! optimization.

use log::debug;
use std::collections::HashMap;

/// Sensitivities below this magnitude are treated as noise and never rank.
pub const SENSITIVITY_THRESHOLD: f64 = 1e-3;

/// Per-branch, per-bus record of power drawn during remedial-action
/// searches, in MW.
///
/// An explicit accumulator passed by reference into every search call; it
/// accumulates across calls so a caller screening many contingencies can
/// cap total bus usage if it chooses to track it that way. Parallel tasks
/// each own a private ledger and [`merge`](Self::merge) them at the join.
#[derive(Debug, Clone, Default)]
pub struct SrapUsageLedger {
    drawn: HashMap<(usize, usize), f64>,
}

impl SrapUsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `mw` drawn from `bus` on behalf of `branch`.
    pub fn record(&mut self, branch: usize, bus: usize, mw: f64) {
        *self.drawn.entry((branch, bus)).or_insert(0.0) += mw;
    }

    /// Power drawn from `bus` on behalf of `branch`, in MW.
    pub fn drawn(&self, branch: usize, bus: usize) -> f64 {
        self.drawn.get(&(branch, bus)).copied().unwrap_or(0.0)
    }

    /// Total power drawn from `bus` across all branches, in MW.
    pub fn bus_total(&self, bus: usize) -> f64 {
        self.drawn
            .iter()
            .filter(|((_, b), _)| *b == bus)
            .map(|(_, mw)| mw)
            .sum()
    }

    /// Fold another ledger into this one, summing overlapping entries.
    pub fn merge(&mut self, other: SrapUsageLedger) {
        for ((branch, bus), mw) in other.drawn {
            *self.drawn.entry((branch, bus)).or_insert(0.0) += mw;
        }
    }

    /// Iterate `((branch, bus), mw)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), f64)> + '_ {
        self.drawn.iter().map(|(&key, &mw)| (key, mw))
    }

    pub fn len(&self) -> usize {
        self.drawn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }
}

/// Decide whether redispatch can bring an overloaded branch back within
/// `target_rating`, and how much power that takes.
///
/// `signed_flow` is the post-contingency flow with its sign intact; the
/// sign, not the magnitude, determines which redispatch direction helps.
/// Candidate buses are thresholded, filtered to those whose sensitivity
/// sign matches the overload direction (a bus that would *worsen* the flow
/// is excluded no matter how large its magnitude), ranked by descending
/// |sensitivity| and truncated to `top_n`. Each selected bus contributes
/// the lesser of its available headroom and the remaining budget; negative
/// headroom counts as none.
///
/// Returns `(solved, power_used_mw)` with the reported power capped at the
/// correction actually required. No admissible bus is infeasibility, not an
/// error: `(false, 0.0)`.
#[allow(clippy::too_many_arguments)]
pub fn is_solvable(
    branch: usize,
    signed_flow: f64,
    target_rating: f64,
    budget_mw: f64,
    available_power: &[f64],
    sensitivity: &[f64],
    top_n: usize,
    ledger: &mut SrapUsageLedger,
) -> (bool, f64) {
    let required = signed_flow.abs() - target_rating;
    if required <= 0.0 {
        // Already within the rating: trivially solved, nothing drawn.
        return (true, 0.0);
    }

    let direction = signed_flow.signum();

    // Threshold, sign-filter, rank by |sensitivity| descending, keep top_n.
    let mut candidates: Vec<(usize, f64)> = sensitivity
        .iter()
        .enumerate()
        .filter(|(_, &s)| s.abs() >= SENSITIVITY_THRESHOLD && s.signum() == direction)
        .map(|(bus, &s)| (bus, s))
        .collect();
    candidates.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
    candidates.truncate(top_n);

    let mut remaining_budget = budget_mw;
    let mut accumulated = 0.0;

    for (bus, _) in candidates {
        if remaining_budget <= 0.0 {
            break;
        }
        let headroom = available_power[bus].max(0.0);
        let contribution = headroom.min(remaining_budget);
        if contribution <= 0.0 {
            continue;
        }

        accumulated += contribution;
        remaining_budget -= contribution;
        ledger.record(branch, bus, contribution);

        if accumulated >= required {
            break;
        }
    }

    let solved = accumulated >= required;
    if !solved {
        debug!(
            "branch {}: SRAP infeasible, {:.1} of {:.1} MW correction reachable",
            branch, accumulated, required
        );
    }

    (solved, accumulated.min(required))
}
