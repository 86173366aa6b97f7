//! Append-only contingency screening report.
//!
//! One record per (monitored branch, contingency, time step) that survived
//! the reporting gate, plus base-case rows. Identity is positional (the
//! record's index in the report), never content-based: duplicate rows are
//! legal and expected (base-case rows repeat every hour regardless of how
//! many contingency groups run). There is deliberately no keyed lookup and
//! no deduplication; `merge` is pure concatenation so partial reports
//! computed independently per time step or per group can be folded together
//! in any grouping without losing rows or reordering them.

use serde::{Deserialize, Serialize};
use std::io::Write;

/// Tabular export header. Column order is a versioned contract: consumers
/// parse exported tables by position, so any change here is a breaking
/// change to the export format.
pub const REPORT_HEADERS: [&str; 18] = [
    "Time",
    "Area 1",
    "Area 2",
    "Monitored",
    "Contingency",
    "Base rating (MW)",
    "Contingency rating (MW)",
    "SRAP rating (MW)",
    "Base flow (MW)",
    "Post-Contingency flow (MW)",
    "Post-SRAP flow (MW)",
    "Base loading (pu)",
    "Post-Contingency loading (pu)",
    "Post-SRAP loading (pu)",
    "Overload",
    "SRAP availability",
    "SRAP Power (MW)",
    "Solved with SRAP",
];

/// Contingency name used for base-case overload rows.
pub const BASE_CASE_NAME: &str = "Base";

/// One classification outcome. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContingencyRecord {
    pub time_index: usize,
    pub area_from: String,
    pub area_to: String,
    pub monitored: String,
    pub contingency: String,
    pub base_rating: f64,
    pub contingency_rating: f64,
    pub srap_rating: f64,
    pub base_flow: f64,
    pub post_contingency_flow: f64,
    pub post_srap_flow: f64,
    pub base_loading: f64,
    pub post_contingency_loading: f64,
    pub post_srap_loading: f64,
    pub overload_status: String,
    pub srap_status: String,
    pub srap_power: f64,
    pub solved_by_srap: bool,
}

impl ContingencyRecord {
    /// Stringify every field in header order.
    pub fn to_string_row(&self) -> Vec<String> {
        vec![
            self.time_index.to_string(),
            self.area_from.clone(),
            self.area_to.clone(),
            self.monitored.clone(),
            self.contingency.clone(),
            self.base_rating.to_string(),
            self.contingency_rating.to_string(),
            self.srap_rating.to_string(),
            self.base_flow.to_string(),
            self.post_contingency_flow.to_string(),
            self.post_srap_flow.to_string(),
            self.base_loading.to_string(),
            self.post_contingency_loading.to_string(),
            self.post_srap_loading.to_string(),
            self.overload_status.clone(),
            self.srap_status.clone(),
            self.srap_power.to_string(),
            self.solved_by_srap.to_string(),
        ]
    }
}

/// Ordered, append-only collection of screening outcomes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContingencyReport {
    records: Vec<ContingencyRecord>,
}

impl ContingencyReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record. Order of insertion is preserved forever.
    pub fn push(&mut self, record: ContingencyRecord) {
        self.records.push(record);
    }

    /// Concatenate another report onto this one, preserving both orders.
    pub fn merge(&mut self, other: ContingencyReport) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ContingencyRecord] {
        &self.records
    }

    /// The fixed export header list.
    pub fn headers() -> &'static [&'static str] {
        &REPORT_HEADERS
    }

    /// Row-major string matrix matching [`REPORT_HEADERS`] column order.
    pub fn to_table(&self) -> Vec<Vec<String>> {
        self.records.iter().map(|r| r.to_string_row()).collect()
    }

    /// Write the header plus all rows as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(REPORT_HEADERS)?;
        for record in &self.records {
            csv.write_record(record.to_string_row())?;
        }
        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(monitored: &str, contingency: &str) -> ContingencyRecord {
        ContingencyRecord {
            time_index: 0,
            area_from: "North".into(),
            area_to: "South".into(),
            monitored: monitored.into(),
            contingency: contingency.into(),
            base_rating: 100.0,
            contingency_rating: 120.0,
            srap_rating: 140.0,
            base_flow: 90.0,
            post_contingency_flow: 125.0,
            post_srap_flow: 120.0,
            base_loading: 0.9,
            post_contingency_loading: 1.25,
            post_srap_loading: 1.2,
            overload_status: "Overload acceptable".into(),
            srap_status: "SRAP applicable".into(),
            srap_power: 5.0,
            solved_by_srap: true,
        }
    }

    fn report_of(names: &[(&str, &str)]) -> ContingencyReport {
        let mut report = ContingencyReport::new();
        for (m, c) in names {
            report.push(record(m, c));
        }
        report
    }

    #[test]
    fn test_header_order_is_pinned() {
        assert_eq!(REPORT_HEADERS.len(), 18);
        assert_eq!(REPORT_HEADERS[0], "Time");
        assert_eq!(REPORT_HEADERS[4], "Contingency");
        assert_eq!(REPORT_HEADERS[10], "Post-SRAP flow (MW)");
        assert_eq!(REPORT_HEADERS[17], "Solved with SRAP");
    }

    #[test]
    fn test_row_matches_header_width() {
        let row = record("L1", "G1").to_string_row();
        assert_eq!(row.len(), REPORT_HEADERS.len());
        assert_eq!(row[3], "L1");
        assert_eq!(row[16], "5");
        assert_eq!(row[17], "true");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let report = report_of(&[("L1", "Base"), ("L1", "Base")]);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_merge_preserves_both_orders() {
        let mut a = report_of(&[("L1", "G1"), ("L2", "G1")]);
        let b = report_of(&[("L1", "G2")]);
        a.merge(b);
        let names: Vec<_> = a
            .records()
            .iter()
            .map(|r| (r.monitored.as_str(), r.contingency.as_str()))
            .collect();
        assert_eq!(names, vec![("L1", "G1"), ("L2", "G1"), ("L1", "G2")]);
    }

    #[test]
    fn test_merge_is_associative() {
        let (a, b, c) = (
            report_of(&[("L1", "G1")]),
            report_of(&[("L2", "G2")]),
            report_of(&[("L3", "G3")]),
        );

        let mut left = a.clone();
        left.merge(b.clone());
        left.merge(c.clone());

        let mut bc = b;
        bc.merge(c);
        let mut right = a;
        right.merge(bc);

        assert_eq!(left.to_table(), right.to_table());
    }

    #[test]
    fn test_csv_round_trips_header() {
        let report = report_of(&[("L1", "G1")]);
        let mut buf = Vec::new();
        report.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Time,Area 1,Area 2"));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn test_record_serializes() {
        let json = serde_json::to_string(&record("L1", "G1")).unwrap();
        assert!(json.contains("\"solved_by_srap\":true"));
    }
}
