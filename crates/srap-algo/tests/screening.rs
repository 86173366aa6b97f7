//! End-to-end screening scenarios.

use num_complex::Complex64;
use sprs::TriMat;
use srap_algo::{SnapshotScreener, SrapUsageLedger, ContingencyReport};
use srap_core::{
    BaseSnapshot, ContingencyCase, ContingencyGroup, Megawatts, MonitoredBranches, PtdfTable,
    SrapConfig,
};

fn flow(mw: f64) -> Complex64 {
    Complex64::new(mw, 0.0)
}

/// 3 monitored branches over 4 buses.
///
/// L1 is the SRAP-eligible branch, L2 gets outaged in group G1, L3 is
/// overloaded already in the base case.
fn branches() -> MonitoredBranches {
    MonitoredBranches {
        names: vec!["L1".into(), "L2".into(), "L3".into()],
        area_from: vec!["North".into(), "North".into(), "East".into()],
        area_to: vec!["South".into(), "East".into(), "South".into()],
        base_rating: vec![100.0, 200.0, 80.0],
        contingency_rating: vec![120.0, 240.0, 96.0],
        srap_rating: vec![140.0, 280.0, 112.0],
    }
}

fn ptdf() -> PtdfTable {
    PtdfTable::new(vec![
        vec![0.3, 0.001, -0.2, 0.0],
        vec![0.5, 0.0, 0.1, 0.0],
        vec![0.05, 0.0, 0.3, 0.0],
    ])
    .unwrap()
}

fn base_snapshot() -> BaseSnapshot {
    BaseSnapshot {
        flow: vec![flow(90.0), flow(100.0), flow(85.0)],
        loading: vec![0.9, 0.5, 1.0625],
    }
}

/// Outage of L2: L1 jumps to 125 MW (grade 2), L3 is untouched.
fn case_g1() -> ContingencyCase {
    let mut tri = TriMat::new((3, 1));
    tri.add_triplet(0, 0, 0.4);
    tri.add_triplet(2, 0, 0.1);
    ContingencyCase {
        group: ContingencyGroup::new("G1", vec![1]),
        flow: vec![flow(125.0), flow(0.0), flow(85.0)],
        loading: vec![1.25, 0.0, 1.0625],
        mlodf: tri.to_csc(),
    }
}

/// Outage of L3: L1 rises to 110 MW, inside its contingency rating.
fn case_g2() -> ContingencyCase {
    let mut tri = TriMat::new((3, 1));
    tri.add_triplet(0, 0, 0.05);
    ContingencyCase {
        group: ContingencyGroup::new("G2", vec![2]),
        flow: vec![flow(110.0), flow(100.0), flow(0.0)],
        loading: vec![1.1, 0.5, 0.0],
        mlodf: tri.to_csc(),
    }
}

fn available_power() -> Vec<f64> {
    vec![50.0, 10.0, 30.0, 0.0]
}

#[test]
fn grade_two_overload_solved_by_srap() {
    let _ = env_logger::builder().is_test(true).try_init();

    let branches = branches();
    let ptdf = ptdf();
    let available = available_power();
    let config = SrapConfig::default();
    let screener = SnapshotScreener::new(&branches, &ptdf, &available, &config).unwrap();

    let (report, ledger) = screener
        .screen_all(0, &base_snapshot(), &[case_g1(), case_g2()])
        .unwrap();

    // One base-case row (L3), one SRAP-solved row (L1/G1), one
    // acceptable-overload row (L1/G2).
    assert_eq!(report.len(), 3);

    let base_row = &report.records()[0];
    assert_eq!(base_row.monitored, "L3");
    assert_eq!(base_row.contingency, "Base");
    assert_eq!(base_row.post_contingency_flow, 0.0);
    assert_eq!(base_row.post_srap_flow, 0.0);
    assert!(!base_row.solved_by_srap);

    let srap_row = &report.records()[1];
    assert_eq!(srap_row.monitored, "L1");
    assert_eq!(srap_row.contingency, "G1");
    // Required correction was 125 - 120 = 5 MW and bus 0 covers it, so the
    // provisional verdict is rewritten to acceptable.
    assert_eq!(srap_row.overload_status, "Overload acceptable");
    assert_eq!(srap_row.srap_status, "SRAP applicable");
    assert!(srap_row.solved_by_srap);
    assert!((srap_row.srap_power - 5.0).abs() < 1e-9);
    assert!((srap_row.post_srap_flow - 120.0).abs() < 1e-9);
    assert!((srap_row.post_srap_loading - 1.2).abs() < 1e-9);

    let mild_row = &report.records()[2];
    assert_eq!(mild_row.contingency, "G2");
    assert_eq!(mild_row.overload_status, "Overload acceptable");
    assert_eq!(mild_row.srap_status, "SRAP not needed");
    assert!(!mild_row.solved_by_srap);
    assert_eq!(mild_row.srap_power, 0.0);

    // The search drew from bus 0 on behalf of branch 0 only.
    assert!(ledger.drawn(0, 0) > 0.0);
    assert!(ledger.drawn(0, 0) <= available[0]);
    assert_eq!(ledger.len(), 1);
}

#[test]
fn grade_four_never_invokes_search() {
    let branches = MonitoredBranches {
        names: vec!["L1".into(), "L2".into()],
        area_from: vec!["North".into(), "North".into()],
        area_to: vec!["South".into(), "East".into()],
        base_rating: vec![100.0, 200.0],
        contingency_rating: vec![120.0, 240.0],
        srap_rating: vec![140.0, 280.0],
    };
    let ptdf = PtdfTable::new(vec![vec![0.3, 0.2], vec![0.5, 0.1]]).unwrap();
    let available = vec![1000.0, 1000.0];
    let config = SrapConfig {
        srap_deadband_pct: 0.0,
        ..Default::default()
    };
    let screener = SnapshotScreener::new(&branches, &ptdf, &available, &config).unwrap();

    let base = BaseSnapshot {
        flow: vec![flow(90.0), flow(100.0)],
        loading: vec![0.9, 0.5],
    };
    let mut tri = TriMat::new((2, 1));
    tri.add_triplet(0, 0, 0.5);
    let case = ContingencyCase {
        group: ContingencyGroup::new("G1", vec![1]),
        flow: vec![flow(145.0), flow(0.0)],
        loading: vec![1.45, 0.0],
        mlodf: tri.to_csc(),
    };

    let (report, ledger) = screener.screen_all(0, &base, &[case]).unwrap();

    assert_eq!(report.len(), 1);
    let row = &report.records()[0];
    // 145 MW against a 140 MW SRAP rating with zero deadband: unresolvable
    assert_eq!(row.overload_status, "Overload not acceptable");
    assert_eq!(row.srap_status, "SRAP not applicable");
    assert!(!row.solved_by_srap);
    assert_eq!(row.srap_power, 0.0);
    assert!((row.post_srap_flow - 145.0).abs() < 1e-9);
    assert!(ledger.is_empty());
}

#[test]
fn base_rows_only_for_first_contingency() {
    let branches = branches();
    let ptdf = ptdf();
    let available = available_power();
    let config = SrapConfig::default();
    let screener = SnapshotScreener::new(&branches, &ptdf, &available, &config).unwrap();

    let (report, _) = screener
        .screen_all(3, &base_snapshot(), &[case_g1(), case_g2()])
        .unwrap();

    let base_rows = report
        .records()
        .iter()
        .filter(|r| r.contingency == "Base")
        .count();
    assert_eq!(base_rows, 1);
}

#[test]
fn parallel_matches_sequential() {
    let branches = branches();
    let ptdf = ptdf();
    let available = available_power();
    let config = SrapConfig::default();
    let screener = SnapshotScreener::new(&branches, &ptdf, &available, &config).unwrap();

    let base = base_snapshot();
    let cases = [case_g1(), case_g2()];

    let (parallel_report, parallel_ledger) = screener.screen_all(5, &base, &cases).unwrap();

    let mut sequential_report = ContingencyReport::new();
    let mut sequential_ledger = SrapUsageLedger::new();
    for (idx, case) in cases.iter().enumerate() {
        screener
            .analyze(
                &mut sequential_report,
                &mut sequential_ledger,
                5,
                idx,
                &base,
                case,
            )
            .unwrap();
    }

    assert_eq!(parallel_report.to_table(), sequential_report.to_table());

    let mut par_entries: Vec<_> = parallel_ledger.iter().collect();
    let mut seq_entries: Vec<_> = sequential_ledger.iter().collect();
    par_entries.sort_by_key(|(key, _)| *key);
    seq_entries.sort_by_key(|(key, _)| *key);
    assert_eq!(par_entries, seq_entries);
}

#[test]
fn budget_starved_search_reports_infeasible() {
    let branches = branches();
    let ptdf = ptdf();
    let available = available_power();
    // 2 MW of budget against a 5 MW correction
    let config = SrapConfig {
        power_budget: Megawatts(2.0),
        ..Default::default()
    };
    let screener = SnapshotScreener::new(&branches, &ptdf, &available, &config).unwrap();

    let (report, _) = screener
        .screen_all(0, &base_snapshot(), &[case_g1()])
        .unwrap();

    let row = report
        .records()
        .iter()
        .find(|r| r.contingency == "G1")
        .unwrap();
    assert!(!row.solved_by_srap);
    assert_eq!(row.overload_status, "Overload not acceptable");
    assert!((row.srap_power - 2.0).abs() < 1e-9);
}

#[test]
fn screener_rejects_misaligned_inputs() {
    let branches = branches();
    let ptdf = ptdf();
    let config = SrapConfig::default();

    // Available power shorter than the bus dimension
    let short = vec![50.0, 10.0];
    assert!(SnapshotScreener::new(&branches, &ptdf, &short, &config).is_err());

    // PTDF with the wrong branch count
    let small_ptdf = PtdfTable::new(vec![vec![0.1, 0.2, 0.3, 0.4]]).unwrap();
    let available = available_power();
    assert!(SnapshotScreener::new(&branches, &small_ptdf, &available, &config).is_err());
}

#[test]
fn csv_export_writes_all_rows() {
    let branches = branches();
    let ptdf = ptdf();
    let available = available_power();
    let config = SrapConfig::default();
    let screener = SnapshotScreener::new(&branches, &ptdf, &available, &config).unwrap();

    let (report, _) = screener
        .screen_all(0, &base_snapshot(), &[case_g1(), case_g2()])
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    let file = std::fs::File::create(&path).unwrap();
    report.write_csv(file).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 1 + report.len());
    assert!(lines[0].starts_with("Time,Area 1,Area 2,Monitored,Contingency"));
    assert!(lines.iter().any(|l| l.contains("Base")));
}
