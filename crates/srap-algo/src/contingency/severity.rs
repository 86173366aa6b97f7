//! Post-contingency overload severity classification.
//!
//! A pure decision tree: given the base and post-contingency state of one
//! monitored branch plus its three-level rating hierarchy, decide whether
//! the branch is reported at all, and if so which severity grade it gets
//! and whether SRAP redispatch is worth evaluating. Grading works in pu of
//! the *base* rating, intervals half-open with inclusive upper bounds.

use srap_core::RATING_EPS;

/// Overload status shown in the report.
pub const OVERLOAD_ACCEPTABLE: &str = "Overload acceptable";
pub const OVERLOAD_NOT_ACCEPTABLE: &str = "Overload not acceptable";
pub const OVERLOAD_ERROR: &str = "Error";

/// SRAP applicability shown in the report.
pub const SRAP_NOT_NEEDED: &str = "SRAP not needed";
pub const SRAP_APPLICABLE: &str = "SRAP applicable";
pub const SRAP_NOT_APPLICABLE: &str = "SRAP not applicable";

/// Discrete overload severity grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadGrade {
    /// No grading interval matched: ill-conditioned rating data. A
    /// data-quality signal for downstream consumers, never a panic.
    Error,
    /// Loading within the contingency rating: tolerable as-is.
    Acceptable,
    /// Loading between contingency and SRAP rating: SRAP may resolve it.
    SrapEligible,
    /// Loading just above the SRAP rating, inside the deadband buffer.
    SrapDeadband,
    /// Loading beyond the SRAP rating plus deadband: redispatch cannot help.
    Unresolvable,
}

impl OverloadGrade {
    /// Numeric grade code (0 error, 1..4 by increasing severity).
    pub fn code(self) -> u8 {
        match self {
            OverloadGrade::Error => 0,
            OverloadGrade::Acceptable => 1,
            OverloadGrade::SrapEligible => 2,
            OverloadGrade::SrapDeadband => 3,
            OverloadGrade::Unresolvable => 4,
        }
    }

    /// Whether this grade enters the remedial-action search.
    ///
    /// Grades 2 and 3 both do. Note the asymmetry for grade 3: its report
    /// message states SRAP is not applicable (the deadband buffer), yet the
    /// branch is still evaluated. Callers testing eligibility must use this
    /// method, not the message string and not [`Severity::srap_applicable`].
    pub fn srap_eligible(self) -> bool {
        matches!(
            self,
            OverloadGrade::SrapEligible | OverloadGrade::SrapDeadband
        )
    }
}

/// Outcome of classifying one (branch, contingency) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Severity {
    pub grade: OverloadGrade,
    /// Overload status message, provisional for grade 2 (may be rewritten
    /// to acceptable if SRAP resolves the overload).
    pub overload_status: &'static str,
    /// SRAP applicability message.
    pub srap_status: &'static str,
    /// True only for grade 2, matching the message text. The broader
    /// eligibility gate is [`OverloadGrade::srap_eligible`].
    pub srap_applicable: bool,
}

/// Classify the post-contingency state of one monitored branch.
///
/// Returns `None` when the branch is not materially affected by this
/// contingency and must not be reported: the flow magnitude must have
/// increased, the relative increase must exceed the contingency deadband,
/// and the post-contingency loading must already exceed the base rating.
///
/// `base_flow` and `contingency_flow` are flow magnitudes in MW;
/// `contingency_loading` is pu of the base rating; deadbands are percents
/// on the 0-100 scale.
#[allow(clippy::too_many_arguments)]
pub fn classify(
    base_flow: f64,
    base_rating: f64,
    contingency_flow: f64,
    contingency_loading: f64,
    contingency_rating: f64,
    srap_rating: f64,
    contingency_deadband_pct: f64,
    srap_deadband_pct: f64,
) -> Option<Severity> {
    let b_flow = base_flow.abs();
    let c_flow = contingency_flow.abs();
    let c_load = contingency_loading.abs();

    // Reporting gate: only branches pushed over their base rating by an
    // actual flow increase beyond the deadband are graded.
    let rel_increase = c_flow / (b_flow + RATING_EPS) - 1.0;
    if c_flow <= b_flow || rel_increase <= contingency_deadband_pct / 100.0 || c_load <= 1.0 {
        return None;
    }

    let rate_nx = contingency_rating / (base_rating + RATING_EPS);
    let rate_srap = srap_rating / (base_rating + RATING_EPS);
    let rate_srap_upper = rate_srap + srap_deadband_pct / 100.0;

    let severity = if c_load > 1.0 && c_load <= rate_nx {
        Severity {
            grade: OverloadGrade::Acceptable,
            overload_status: OVERLOAD_ACCEPTABLE,
            srap_status: SRAP_NOT_NEEDED,
            srap_applicable: false,
        }
    } else if c_load > rate_nx && c_load <= rate_srap {
        Severity {
            grade: OverloadGrade::SrapEligible,
            overload_status: OVERLOAD_NOT_ACCEPTABLE,
            srap_status: SRAP_APPLICABLE,
            srap_applicable: true,
        }
    } else if c_load > rate_srap && c_load <= rate_srap_upper {
        // Deadband buffer just above the SRAP rating: still walked through
        // the SRAP-eligible path, but reported as not applicable.
        Severity {
            grade: OverloadGrade::SrapDeadband,
            overload_status: OVERLOAD_NOT_ACCEPTABLE,
            srap_status: SRAP_NOT_APPLICABLE,
            srap_applicable: false,
        }
    } else if c_load > rate_srap_upper {
        Severity {
            grade: OverloadGrade::Unresolvable,
            overload_status: OVERLOAD_NOT_ACCEPTABLE,
            srap_status: SRAP_NOT_APPLICABLE,
            srap_applicable: false,
        }
    } else {
        // Unreachable with finite ratings; NaN anywhere in the hierarchy
        // fails every interval and lands here.
        Severity {
            grade: OverloadGrade::Error,
            overload_status: OVERLOAD_ERROR,
            srap_status: SRAP_NOT_APPLICABLE,
            srap_applicable: false,
        }
    };

    Some(severity)
}
